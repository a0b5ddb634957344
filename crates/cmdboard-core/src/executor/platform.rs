//! Platform-specific process construction.

use tokio::process::Command;

/// Strips surrounding quotes and whitespace from a script path.
pub(super) fn script_path(command: &str) -> &str {
    command.trim().trim_matches('"')
}

#[cfg(windows)]
mod imp {
    use std::io;
    use std::os::windows::process::CommandExt;

    use super::{Command, script_path};

    const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;

    /// `cmd.exe /C <command>` with no console window.
    pub(crate) fn captured_command(command: &str) -> Command {
        let mut cmd = std::process::Command::new("cmd.exe");
        cmd.raw_arg("/C").raw_arg(command).creation_flags(CREATE_NO_WINDOW);
        Command::from(cmd)
    }

    /// Arguments for `cmd.exe` that keep the console open after the command.
    pub(crate) fn persistent_console_args(command: &str, script: bool) -> String {
        if script {
            format!(
                "/K powershell.exe -NoProfile -ExecutionPolicy Bypass -File \"{}\"",
                script_path(command)
            )
        } else {
            format!("/K {}", command)
        }
    }

    /// `cmd.exe /K ...` in a new console window.
    pub(crate) fn visible_command(command: &str, _elevated: bool, script: bool, _terminal: &str) -> Command {
        let mut cmd = std::process::Command::new("cmd.exe");
        cmd.raw_arg(persistent_console_args(command, script)).creation_flags(CREATE_NEW_CONSOLE);
        Command::from(cmd)
    }

    /// Launches `cmd.exe` with the `runas` verb so Windows asks for elevation.
    ///
    /// Returns an error when the launch fails or the user declines the prompt.
    #[allow(unsafe_code)]
    pub(crate) fn launch_elevated(command: &str, script: bool) -> io::Result<()> {
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
        use windows::core::PCWSTR;

        let wide = |s: &str| s.encode_utf16().chain(std::iter::once(0)).collect::<Vec<u16>>();
        let verb = wide("runas");
        let file = wide("cmd.exe");
        let params = wide(&persistent_console_args(command, script));

        // SAFETY: every pointer refers to a NUL-terminated buffer that outlives the call.
        let instance = unsafe {
            ShellExecuteW(
                HWND::default(),
                PCWSTR(verb.as_ptr()),
                PCWSTR(file.as_ptr()),
                PCWSTR(params.as_ptr()),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };

        // Values above 32 mean success.
        if instance.0 as isize > 32 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use super::{Command, script_path};

    /// `sh -c <command>`.
    pub(crate) fn captured_command(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }

    /// Shell script run inside the terminal; drops into an interactive shell
    /// afterwards so the window stays open.
    pub(crate) fn persistent_console_script(command: &str, elevated: bool, script: bool) -> String {
        let inner = if script {
            format!("pwsh -NoProfile -File {}", sh_quote(script_path(command)))
        } else if elevated {
            format!("pkexec sh -c {}", sh_quote(command))
        } else {
            command.to_string()
        };
        format!("{}; exec \"${{SHELL:-sh}}\"", inner)
    }

    /// `<terminal> -e sh -c '<command>; exec $SHELL'`.
    pub(crate) fn visible_command(command: &str, elevated: bool, script: bool, terminal: &str) -> Command {
        let mut cmd = Command::new(terminal);
        cmd.arg("-e").arg("sh").arg("-c").arg(persistent_console_script(command, elevated, script));
        cmd
    }

    pub(crate) fn sh_quote(value: &str) -> String {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

pub(crate) use imp::*;

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_sh_quote_escapes_single_quotes() {
        assert_eq!(sh_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_persistent_console_script() {
        assert_eq!(persistent_console_script("top", false, false), "top; exec \"${SHELL:-sh}\"");
        assert_eq!(
            persistent_console_script("sfc /scannow", true, false),
            "pkexec sh -c 'sfc /scannow'; exec \"${SHELL:-sh}\""
        );
        assert_eq!(
            persistent_console_script("\"/opt/run me.ps1\"", false, true),
            "pwsh -NoProfile -File '/opt/run me.ps1'; exec \"${SHELL:-sh}\""
        );
    }

    #[test]
    fn test_script_path_unquotes() {
        assert_eq!(script_path(" \"C:\\a b\\x.ps1\" "), "C:\\a b\\x.ps1");
    }
}
