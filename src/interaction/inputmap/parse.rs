use bevy::prelude::*;
use smallvec::SmallVec;

use super::types::DirectionalBindings;
use crate::core::config::ControlsConfig;

#[derive(Debug, Default)]
pub struct ParsedBindings {
    pub bindings: DirectionalBindings,
    pub errors: Vec<String>,
}

/// Build directional bindings from `Key:<KeyCode>` tokens; bad tokens are reported and skipped.
pub fn parse_controls(cfg: &ControlsConfig) -> ParsedBindings {
    let mut result = ParsedBindings::default();
    for (label, tokens, slot) in [
        ("left", &cfg.left, &mut result.bindings.left),
        ("right", &cfg.right, &mut result.bindings.right),
        ("up", &cfg.up, &mut result.bindings.up),
    ] {
        collect(label, tokens, slot, &mut result.errors);
    }
    result
}

fn collect(label: &str, tokens: &[String], out: &mut SmallVec<[KeyCode; 2]>, errors: &mut Vec<String>) {
    for token in tokens {
        match parse_token(token.trim()) {
            Ok(k) if out.contains(&k) => errors.push(format!("[{label}] duplicate key '{token}'")),
            Ok(k) => out.push(k),
            Err(e) => errors.push(format!("[{label} '{token}'] {e}")),
        }
    }
    if out.is_empty() {
        errors.push(format!("[{label}] no usable key bound"));
    }
}

fn parse_token(s: &str) -> Result<KeyCode, String> {
    match s.strip_prefix("Key:") {
        Some(rest) => parse_keycode(rest),
        None => Err(format!("Unrecognized token '{s}' (expected Key:<name>)")),
    }
}

fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    let kc = match name {
        "ArrowLeft" | "Left" => KeyCode::ArrowLeft,
        "ArrowRight" | "Right" => KeyCode::ArrowRight,
        "ArrowUp" | "Up" => KeyCode::ArrowUp,
        "ArrowDown" | "Down" => KeyCode::ArrowDown,
        "Space" => KeyCode::Space,
        "A" | "KeyA" => KeyCode::KeyA,
        "D" | "KeyD" => KeyCode::KeyD,
        "W" | "KeyW" => KeyCode::KeyW,
        "S" | "KeyS" => KeyCode::KeyS,
        "J" | "KeyJ" => KeyCode::KeyJ,
        "K" | "KeyK" => KeyCode::KeyK,
        "L" | "KeyL" => KeyCode::KeyL,
        "I" | "KeyI" => KeyCode::KeyI,
        other => return Err(format!("Unsupported KeyCode '{other}' (extend parser)")),
    };
    Ok(kc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_controls_are_arrow_keys() {
        let parsed = parse_controls(&ControlsConfig::default());
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.bindings.left.as_slice(), &[KeyCode::ArrowLeft]);
        assert_eq!(parsed.bindings.up.as_slice(), &[KeyCode::ArrowUp]);
    }

    #[test]
    fn bad_tokens_are_reported_not_fatal() {
        let cfg = ControlsConfig {
            left: vec!["Key:ArrowLeft".into(), "Key:A".into(), "Mouse:Left".into()],
            right: vec!["Key:Nope".into()],
            up: vec!["Key:W".into(), "Key:KeyW".into()],
        };
        let parsed = parse_controls(&cfg);
        assert_eq!(parsed.bindings.left.as_slice(), &[KeyCode::ArrowLeft, KeyCode::KeyA]);
        assert!(parsed.bindings.right.is_empty());
        assert_eq!(parsed.bindings.up.as_slice(), &[KeyCode::KeyW]);
        assert_eq!(parsed.errors.len(), 4, "{:?}", parsed.errors);
    }
}
