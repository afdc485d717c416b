use colored::Colorize;

use crate::output::Notice;

/// Format a notice for the terminal.
pub fn format_notice_pretty(notice: &Notice) -> String {
    if notice.ok {
        format!("{} {}", "✓".green(), notice.message)
    } else {
        format!("{}: {}\n  {}", "error".red().bold(), notice.title.bold(), notice.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MontageError;
    use crate::montage::SessionCommand;

    #[test]
    fn test_failure_has_title_and_message() {
        let notice = Notice::failure(SessionCommand::Extend, &MontageError::EmptyResponse);
        let output = format_notice_pretty(&notice);

        assert!(output.contains("Problem extending session in Montage"));
        assert!(output.contains("body was empty"));
    }

    #[test]
    fn test_success_shows_message_only() {
        let notice = Notice {
            ok: true,
            title: "Extended session".to_string(),
            message: "Extended session until 9:5".to_string(),
            session: None,
        };
        let output = format_notice_pretty(&notice);

        assert!(output.ends_with("Extended session until 9:5"));
        assert!(!output.contains("error"));
    }
}
