use anyhow::{Context, Result, anyhow};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};

/// Parse a hotkey string like "ctrl+shift+x", "Alt+F9" or "F8"
pub fn parse_hotkey(hotkey_str: &str) -> Result<HotKey> {
    let mut modifiers = Modifiers::empty();
    let mut key_code: Option<Code> = None;

    for part in hotkey_str.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        let upper = part.to_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => modifiers |= Modifiers::CONTROL,
            "SHIFT" => modifiers |= Modifiers::SHIFT,
            "ALT" | "OPTION" => modifiers |= Modifiers::ALT,
            "WIN" | "SUPER" | "META" | "CMD" => modifiers |= Modifiers::SUPER,
            key => {
                if key_code.is_some() {
                    return Err(anyhow!("More than one key in hotkey '{}'", hotkey_str));
                }
                key_code = Some(parse_key_code(key)?);
            }
        }
    }

    let code = key_code.ok_or_else(|| anyhow!("No key found in hotkey '{}'", hotkey_str))?;
    let modifiers = (!modifiers.is_empty()).then_some(modifiers);
    Ok(HotKey::new(modifiers, code))
}

fn parse_key_code(key: &str) -> Result<Code> {
    let code = match key {
        "A" => Code::KeyA,
        "B" => Code::KeyB,
        "C" => Code::KeyC,
        "D" => Code::KeyD,
        "E" => Code::KeyE,
        "F" => Code::KeyF,
        "G" => Code::KeyG,
        "H" => Code::KeyH,
        "I" => Code::KeyI,
        "J" => Code::KeyJ,
        "K" => Code::KeyK,
        "L" => Code::KeyL,
        "M" => Code::KeyM,
        "N" => Code::KeyN,
        "O" => Code::KeyO,
        "P" => Code::KeyP,
        "Q" => Code::KeyQ,
        "R" => Code::KeyR,
        "S" => Code::KeyS,
        "T" => Code::KeyT,
        "U" => Code::KeyU,
        "V" => Code::KeyV,
        "W" => Code::KeyW,
        "X" => Code::KeyX,
        "Y" => Code::KeyY,
        "Z" => Code::KeyZ,

        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,

        "F1" => Code::F1,
        "F2" => Code::F2,
        "F3" => Code::F3,
        "F4" => Code::F4,
        "F5" => Code::F5,
        "F6" => Code::F6,
        "F7" => Code::F7,
        "F8" => Code::F8,
        "F9" => Code::F9,
        "F10" => Code::F10,
        "F11" => Code::F11,
        "F12" => Code::F12,

        "SPACE" => Code::Space,
        "ENTER" | "RETURN" => Code::Enter,
        "TAB" => Code::Tab,
        "INSERT" | "INS" => Code::Insert,
        "HOME" => Code::Home,
        "END" => Code::End,
        "PAGEUP" | "PGUP" => Code::PageUp,
        "PAGEDOWN" | "PGDN" => Code::PageDown,
        "PRINTSCREEN" | "PRTSC" => Code::PrintScreen,

        _ => return Err(anyhow!("Unknown key: {}", key)),
    };

    Ok(code)
}

/// Owns the OS registration, must live on the thread running the UI event loop
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyManager {
    /// Register the hotkey described by `combo`
    pub fn register(combo: &str) -> Result<Self> {
        let hotkey = parse_hotkey(combo)?;
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        manager
            .register(hotkey)
            .with_context(|| format!("Failed to register hotkey '{}'", combo))?;

        tracing::info!("Registered hotkey {} (id {})", combo, hotkey.id());
        Ok(Self { manager, hotkey })
    }

    /// A `Send` handle that waits for this hotkey on any thread
    pub fn listener(&self) -> HotkeyListener {
        HotkeyListener {
            id: self.hotkey.id(),
        }
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HotkeyListener {
    id: u32,
}

impl HotkeyListener {
    /// Wait for hotkey press (blocking)
    pub fn wait(&self) -> Result<()> {
        let receiver = GlobalHotKeyEvent::receiver();
        loop {
            let event = receiver.recv().context("Hotkey event channel closed")?;
            if self.matches(&event) {
                return Ok(());
            }
            tracing::trace!("Ignoring hotkey event {:?}", event);
        }
    }

    fn matches(&self, event: &GlobalHotKeyEvent) -> bool {
        event.id == self.id && event.state == HotKeyState::Pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_hotkey() {
        let hotkey = parse_hotkey("ctrl+shift+x").unwrap();
        assert_eq!(
            hotkey,
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyX)
        );
    }

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        let a = parse_hotkey("Ctrl + Shift + X").unwrap();
        let b = parse_hotkey("CONTROL+shift+x").unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_parse_single_key() {
        let hotkey = parse_hotkey("F9").unwrap();
        assert_eq!(hotkey, HotKey::new(None, Code::F9));
    }

    #[test]
    fn test_parse_super_aliases() {
        let win = parse_hotkey("win+alt+5").unwrap();
        let cmd = parse_hotkey("cmd+alt+5").unwrap();
        assert_eq!(win, cmd);
        assert_eq!(
            win,
            HotKey::new(Some(Modifiers::SUPER | Modifiers::ALT), Code::Digit5)
        );
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        assert!(parse_hotkey("ctrl+shift").is_err());
        assert!(parse_hotkey("").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_or_double_key() {
        assert!(parse_hotkey("ctrl+banana").is_err());
        assert!(parse_hotkey("ctrl+a+b").is_err());
    }
}
