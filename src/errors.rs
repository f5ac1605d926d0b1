//! Exit-code mapping for the binary.
//!
//! The analysis core never fails; only writing a report file can. A failed write maps
//! to exit code 1, everything else exits 0.

/// Exit code for a failed report export.
pub const EXPORT_FAILURE_EXIT_CODE: u8 = 1;

/// One-line description including the underlying cause chain.
pub fn describe_export_error(e: &anyhow::Error) -> String {
    format!("{e:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_export_error_description_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Err::<(), _>(io)
            .context("failed to write JSON report out/r.json")
            .unwrap_err();
        assert_eq!(
            describe_export_error(&err),
            "failed to write JSON report out/r.json: denied"
        );
    }
}
