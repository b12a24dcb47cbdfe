//! Passthrough argument filtering.
//!
//! Most helm arguments have equivalents as target fields; only a small
//! allow-list may be passed through verbatim. Filtering is a single
//! left-to-right pass driven by a two-state scanner: after an allow-listed
//! option that takes a separate value token, the next token is accepted
//! unconditionally regardless of its own shape. Unknown tokens are never
//! assumed to take a value.
//!
//! Rejections are collected, not raised per token, so the caller can
//! report every violation at once.

use std::collections::HashSet;

/// Boolean flags that may be passed through to helm.
pub const PASSTHROUGH_FLAGS: &[&str] = &[
    "--atomic",
    "--cleanup-on-fail",
    "--create-namespace",
    "--debug",
    "--dry-run",
    "--force",
    "--wait",
    "--wait-for-jobs",
];

/// Value-taking options that may be passed through to helm, in either the
/// `--opt value` or `--opt=value` form.
pub const PASSTHROUGH_OPTIONS: &[&str] = &[
    "--kubeconfig",
    "--kube-context",
    "--kube-apiserver",
    "--kube-as-group",
    "--kube-as-user",
    "--kube-ca-file",
    "--kube-token",
];

/// Scanner state between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// The next token is classified on its own.
    Normal,
    /// The next token is the value of a preceding option and is accepted
    /// unconditionally.
    ExpectingOptionValue,
}

/// What to do with a token classified in [`ScanState::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// Accept; stay in `Normal`.
    Accept,
    /// Accept; the following token is this option's value.
    AcceptExpectValue,
    /// Reject; stay in `Normal`.
    Reject,
}

fn classify(token: &str, flags: &HashSet<&str>, options: &HashSet<&str>) -> Verdict {
    if flags.contains(token) {
        return Verdict::Accept;
    }
    if let Some((name, _value)) = token.split_once('=')
        && options.contains(name)
    {
        // Embedded-value form needs no lookahead.
        return Verdict::Accept;
    }
    if options.contains(token) {
        return Verdict::AcceptExpectValue;
    }
    Verdict::Reject
}

/// Outcome of filtering a passthrough argument list.
///
/// Both sequences preserve input order. An empty `rejected` means every
/// token was allow-listed (or the value of an allow-listed option).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredArgs {
    /// Tokens forwarded to the helm invocation.
    pub accepted: Vec<String>,
    /// Tokens outside the allow-list.
    pub rejected: Vec<String>,
}

/// Partitions argument tokens into accepted and rejected sequences.
///
/// An allow-listed option as the final token is accepted even though its
/// value is missing; helm itself reports the missing value. Callers
/// needing stricter validation must check independently.
#[must_use]
pub fn filter_args<I, S>(args: I) -> FilteredArgs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let flags: HashSet<&str> = PASSTHROUGH_FLAGS.iter().copied().collect();
    let options: HashSet<&str> = PASSTHROUGH_OPTIONS.iter().copied().collect();

    let mut filtered = FilteredArgs::default();
    let mut state = ScanState::Normal;
    for token in args {
        let token = token.into();
        match state {
            ScanState::ExpectingOptionValue => {
                filtered.accepted.push(token);
                state = ScanState::Normal;
            }
            ScanState::Normal => match classify(&token, &flags, &options) {
                Verdict::Accept => filtered.accepted.push(token),
                Verdict::AcceptExpectValue => {
                    filtered.accepted.push(token);
                    state = ScanState::ExpectingOptionValue;
                }
                Verdict::Reject => {
                    tracing::debug!(%token, "rejected passthrough argument");
                    filtered.rejected.push(token);
                }
            },
        }
    }
    filtered
}

/// Builds the user-facing message for rejected passthrough arguments.
pub(crate) fn invalid_args_message(rejected: &[String]) -> String {
    let allowed = PASSTHROUGH_FLAGS
        .iter()
        .chain(PASSTHROUGH_OPTIONS)
        .map(|arg| format!("  - {arg}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "the following command line arguments are not valid: {}.\n\n\
         Only the following passthrough arguments are allowed:\n\n{allowed}",
        rejected.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> (HashSet<&'static str>, HashSet<&'static str>) {
        (
            PASSTHROUGH_FLAGS.iter().copied().collect(),
            PASSTHROUGH_OPTIONS.iter().copied().collect(),
        )
    }

    #[test]
    fn classify_flag() {
        let (flags, options) = sets();
        assert_eq!(classify("--dry-run", &flags, &options), Verdict::Accept);
    }

    #[test]
    fn classify_option_with_embedded_value() {
        let (flags, options) = sets();
        assert_eq!(
            classify("--kube-token=abc", &flags, &options),
            Verdict::Accept
        );
    }

    #[test]
    fn classify_option_expecting_value() {
        let (flags, options) = sets();
        assert_eq!(
            classify("--kubeconfig", &flags, &options),
            Verdict::AcceptExpectValue
        );
    }

    #[test]
    fn classify_unknown_token() {
        let (flags, options) = sets();
        assert_eq!(classify("--bogus", &flags, &options), Verdict::Reject);
        assert_eq!(classify("--bogus=1", &flags, &options), Verdict::Reject);
        assert_eq!(classify("install", &flags, &options), Verdict::Reject);
    }

    #[test]
    fn filter_mixed_tokens() {
        let filtered = filter_args(["--dry-run", "--kubeconfig", "/tmp/cfg", "--bogus"]);
        assert_eq!(filtered.accepted, vec!["--dry-run", "--kubeconfig", "/tmp/cfg"]);
        assert_eq!(filtered.rejected, vec!["--bogus"]);
    }

    #[test]
    fn filter_embedded_value_needs_no_lookahead() {
        let filtered = filter_args(["--kube-token=abc"]);
        assert_eq!(filtered.accepted, vec!["--kube-token=abc"]);
        assert!(filtered.rejected.is_empty());
    }

    #[test]
    fn filter_option_value_accepted_even_if_unknown_shape() {
        // The value of an allowed option is accepted regardless of its own
        // form, including when it looks like a rejected flag.
        let filtered = filter_args(["--kube-context", "--bogus"]);
        assert_eq!(filtered.accepted, vec!["--kube-context", "--bogus"]);
        assert!(filtered.rejected.is_empty());
    }

    #[test]
    fn filter_dangling_option_is_permissive() {
        let filtered = filter_args(["--dry-run", "--kubeconfig"]);
        assert_eq!(filtered.accepted, vec!["--dry-run", "--kubeconfig"]);
        assert!(filtered.rejected.is_empty());
    }

    #[test]
    fn filter_preserves_input_order() {
        let filtered = filter_args(["--bad1", "--wait", "--bad2", "--force"]);
        assert_eq!(filtered.accepted, vec!["--wait", "--force"]);
        assert_eq!(filtered.rejected, vec!["--bad1", "--bad2"]);
    }

    #[test]
    fn filter_is_idempotent_on_accepted_output() {
        let first = filter_args(["--dry-run", "--kubeconfig", "/tmp/cfg", "--bogus"]);
        let second = filter_args(first.accepted.clone());
        assert_eq!(second.accepted, first.accepted);
        assert!(second.rejected.is_empty());
    }

    #[test]
    fn filter_empty_input() {
        let filtered = filter_args(Vec::<String>::new());
        assert!(filtered.accepted.is_empty());
        assert!(filtered.rejected.is_empty());
    }

    #[test]
    fn invalid_args_message_names_rejects_and_allowed() {
        let msg = invalid_args_message(&["--bogus".to_string(), "--worse".to_string()]);
        assert!(msg.contains("--bogus --worse"));
        for arg in PASSTHROUGH_FLAGS.iter().chain(PASSTHROUGH_OPTIONS) {
            assert!(msg.contains(arg), "missing {arg} in allowed list");
        }
    }
}
