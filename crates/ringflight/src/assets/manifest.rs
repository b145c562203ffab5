use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Optional assets the host has loaded, keyed by name.
/// Loaded from a JSON file at runtime; anything absent is skipped by the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
    /// One-shot particle effects.
    #[serde(default)]
    pub effects: HashMap<String, EffectDescriptor>,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
    /// Loop until stopped (background music).
    #[serde(default)]
    pub looping: bool,
}

/// Describes a particle effect definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// Relative path to the emitter definition.
    pub path: String,
    /// Numeric id the host uses to start this effect.
    pub event_id: u32,
}

/// Name of the effect played where the player dies.
pub const PLAYER_EXPLOSION: &str = "player_explosion";

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn has_effect(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds_and_effects() {
        let json = r#"{
            "sounds": {
                "coin": { "path": "coin.wav", "event_id": 1 },
                "music": { "path": "music.m4a", "event_id": 3, "looping": true }
            },
            "effects": {
                "player_explosion": { "path": "PlayerExplosion.json", "event_id": 1 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);
        assert_eq!(manifest.sounds["coin"].event_id, Some(1));
        assert!(!manifest.sounds["coin"].looping);
        assert!(manifest.sounds["music"].looping);
        assert!(manifest.has_effect(PLAYER_EXPLOSION));
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = AssetManifest::from_json("{}").unwrap();
        assert!(manifest.sounds.is_empty());
        assert!(!manifest.has_effect(PLAYER_EXPLOSION));
    }
}
