use crate::error::MontageError;
use crate::host::osascript::{execute_void, js_string};
use crate::output::{Notice, Notifier};

/// Posts notices to the macOS notification center.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    fn script(notice: &Notice) -> String {
        format!(
            r#"(() => {{
    const app = Application.currentApplication();
    app.includeStandardAdditions = true;
    app.displayNotification({}, {{ withTitle: {} }});
}})()"#,
            js_string(&notice.message),
            js_string(&notice.title)
        )
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), MontageError> {
        execute_void(&Self::script(notice))
    }
}
