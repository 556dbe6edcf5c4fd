//! Dangerous command rules
//!
//! Patterns for shell commands that must not reach a generated script
//! unreviewed. Tiers are cumulative: strict checks everything standard
//! checks, standard checks everything permissive checks.

use crate::config::SecurityLevel;
use crate::rules::{active_rules, Rule};

/// Permissive tier - unambiguous, catastrophic operations
pub const PERMISSIVE_RULES: &[Rule] = &[
    // Filesystem destruction
    Rule::new(
        "rm-root",
        SecurityLevel::Permissive,
        r"\brm\s+(-{1,2}[a-z-]*\s+)*/\*?(\s|$|[;&|])",
        "Deleting the root filesystem",
    ),
    Rule::new(
        "rm-home",
        SecurityLevel::Permissive,
        r"\brm\s+(-{1,2}[a-z-]*\s+)*(~|\$HOME|\$\{HOME\})/?(\s|$|[;&|])",
        "Deleting the home directory",
    ),
    Rule::new(
        "rm-system-dirs",
        SecurityLevel::Permissive,
        r"\brm\s+(-{1,2}[a-z-]*\s+)*/(etc|usr|var|bin|sbin|lib|lib64|boot|opt|root)\b",
        "Deleting system directories",
    ),
    // Disk destruction
    Rule::new(
        "dd-disk-device",
        SecurityLevel::Permissive,
        r"\bdd\b.*\bof=/dev/(sd|nvme|hd|vd|xvd|mmcblk)[a-z0-9]",
        "Writing directly to a disk device",
    ),
    Rule::new(
        "mkfs-device",
        SecurityLevel::Permissive,
        r"\bmkfs(\.\w+)?\s+.*/dev/",
        "Formatting a disk device",
    ),
    Rule::new(
        "redirect-disk-device",
        SecurityLevel::Permissive,
        r">\s*/dev/(sd|nvme|hd|vd|xvd)[a-z]",
        "Overwriting a disk device",
    ),
    // Resource exhaustion
    Rule::new(
        "fork-bomb",
        SecurityLevel::Permissive,
        r":\(\)\s*\{.*:\s*\|\s*:.*&",
        "Fork bomb",
    ),
    // Remote code execution
    Rule::new(
        "download-pipe-shell",
        SecurityLevel::Permissive,
        r"\b(curl|wget)\b.*\|\s*(sudo\s+)?(ba|z|k|da)?sh\b",
        "Piping downloaded content to a shell",
    ),
    Rule::new(
        "download-pipe-interpreter",
        SecurityLevel::Permissive,
        r"\b(curl|wget)\b.*\|\s*(sudo\s+)?(python[23]?|perl|ruby|node|php)\b",
        "Piping downloaded content to an interpreter",
    ),
    Rule::new(
        "reverse-shell-dev-tcp",
        SecurityLevel::Permissive,
        r"/dev/(tcp|udp)/",
        "Reverse shell via /dev/tcp",
    ),
    Rule::new(
        "reverse-shell-nc",
        SecurityLevel::Permissive,
        r"\b(nc|ncat|netcat)\b.*\s-e\s",
        "Netcat executing a program",
    ),
];

/// Standard tier - destructive or privileged operations
pub const STANDARD_RULES: &[Rule] = &[
    Rule::new(
        "rm-recursive-force",
        SecurityLevel::Standard,
        r"\brm\s+(.*\s)?(-[a-z]*r[a-z]*f[a-z]*|-[a-z]*f[a-z]*r[a-z]*|--recursive|--force)\b",
        "Recursive or forced delete",
    ),
    Rule::new(
        "privilege-escalation",
        SecurityLevel::Standard,
        r"\b(sudo|doas|pkexec)\b",
        "Privilege escalation",
    ),
    Rule::new(
        "su-root",
        SecurityLevel::Standard,
        r"\bsu(\s+-)?(\s+root)?(\s|$)",
        "Switching to another user",
    ),
    Rule::new(
        "disk-tools",
        SecurityLevel::Standard,
        r"\b(mkfs(\.\w+)?|fdisk|sfdisk|parted|wipefs|shred)\b",
        "Disk formatting or wiping utility",
    ),
    Rule::new(
        "dd-raw",
        SecurityLevel::Standard,
        r"\bdd\s+.*\b(if|of)=",
        "Raw block copy with dd",
    ),
    Rule::new(
        "chmod-world-writable",
        SecurityLevel::Standard,
        r"\bchmod\b.*\b(777|666|a\+w|o\+w)\b",
        "Setting world-writable permissions",
    ),
    Rule::new(
        "power-control",
        SecurityLevel::Standard,
        r"\b(shutdown|reboot|halt|poweroff|init\s+[06])\b",
        "Shutting down or rebooting the host",
    ),
    Rule::new(
        "kill-all-processes",
        SecurityLevel::Standard,
        r"\bkill\s+-9\s+-1\b",
        "Killing every process",
    ),
    Rule::new(
        "crontab-remove",
        SecurityLevel::Standard,
        r"\bcrontab\s+-r\b",
        "Removing all cron jobs",
    ),
    Rule::new(
        "decode-pipe-shell",
        SecurityLevel::Standard,
        r"\bbase64\s+(-d|--decode)\b.*\|\s*(ba|z)?sh\b",
        "Executing decoded payload",
    ),
    Rule::new(
        "eval",
        SecurityLevel::Standard,
        r"\beval\s",
        "Evaluating dynamic shell code",
    ),
];

/// Strict tier - shell metacharacters and anything remotely risky
pub const STRICT_RULES: &[Rule] = &[
    Rule::new(
        "shell-chaining",
        SecurityLevel::Strict,
        r"[;&|]",
        "Shell command chaining or piping",
    ),
    Rule::new(
        "command-substitution",
        SecurityLevel::Strict,
        r"`|\$\(",
        "Command substitution",
    ),
    Rule::new(
        "shell-redirection",
        SecurityLevel::Strict,
        r"[<>]",
        "Shell redirection",
    ),
    Rule::new(
        "rm-any",
        SecurityLevel::Strict,
        r"\b(rm|rmdir|unlink)\s",
        "Deleting files",
    ),
    Rule::new(
        "permission-change",
        SecurityLevel::Strict,
        r"\b(chmod|chown|chgrp|setfacl)\b",
        "Changing file permissions or ownership",
    ),
    Rule::new(
        "network-tools",
        SecurityLevel::Strict,
        r"\b(curl|wget|nc|ncat|netcat|telnet|ssh|scp|rsync|ftp)\b",
        "Network transfer or remote shell",
    ),
    Rule::new(
        "inline-interpreter",
        SecurityLevel::Strict,
        r"\b(python[23]?|perl|ruby|node|php|bash|sh|zsh)\s+-[ce]\b",
        "Inline interpreter code",
    ),
    Rule::new(
        "process-kill",
        SecurityLevel::Strict,
        r"\b(kill|killall|pkill)\b",
        "Killing processes",
    ),
];

const TIERS: &[&[Rule]] = &[PERMISSIVE_RULES, STANDARD_RULES, STRICT_RULES];

/// Get all rules active at the specified security level, in match priority order
pub fn get_rules_for_level(level: SecurityLevel) -> Vec<&'static Rule> {
    active_rules(TIERS, level)
}
