use engine::{AssetKey, AssetKeyError, ColorGrade};

/// Sprite file stems of the walk cycle, in frame-index order: the idle pose,
/// two transition poses, then the sixteen looping walk poses.
const CHARACTER_FRAME_STEMS: [&str; 19] = [
    "1", "2", "2turn1", "2turn2", "3turn2", "4turn2", "6turn2", "7turn2", "8turn2", "9turn2",
    "10turn2", "11turn2", "12turn2", "13turn2", "14turn2", "15turn2", "16turn2", "17turn2",
    "18turn2",
];

pub(crate) const GAME_CHARACTER_GRADE: ColorGrade = ColorGrade {
    contrast: 1.8,
    saturation: 0.57,
    brightness: 0.9,
    blackness: 0.45,
};

pub(crate) const SCENE2_CHARACTER_GRADE: ColorGrade = ColorGrade {
    contrast: 1.4,
    saturation: 1.2,
    brightness: 1.0,
    blackness: 0.1,
};

pub(crate) const SCENE3_CHARACTER_GRADE: ColorGrade = ColorGrade {
    contrast: 1.3,
    saturation: 0.35,
    brightness: 0.95,
    blackness: 0.2,
};

/// Every image key the game draws, validated once at startup.
#[derive(Debug, Clone)]
pub(crate) struct GameAssets {
    pub character_frames: Vec<AssetKey>,
    pub title_clip: AssetKey,
    pub game_background: AssetKey,
    pub game_foreground: AssetKey,
    pub scene2_clip: AssetKey,
    pub scene3_clip: AssetKey,
    pub scene4_clip: AssetKey,
}

impl GameAssets {
    pub fn new() -> Result<Self, AssetKeyError> {
        let character_frames = CHARACTER_FRAME_STEMS
            .iter()
            .map(|stem| AssetKey::parse(&format!("character/{stem}")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            character_frames,
            title_clip: AssetKey::parse("clips/title")?,
            game_background: AssetKey::parse("backgrounds/game")?,
            game_foreground: AssetKey::parse("backgrounds/game_foreground")?,
            scene2_clip: AssetKey::parse("clips/scene2")?,
            scene3_clip: AssetKey::parse("clips/scene3")?,
            scene4_clip: AssetKey::parse("clips/scene4")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::FrameBands;

    #[test]
    fn one_sprite_per_frame_index() {
        let assets = GameAssets::new().expect("assets");
        assert_eq!(
            assets.character_frames.len(),
            FrameBands::STANDARD.frame_count()
        );
        assert_eq!(assets.character_frames[0].as_str(), "character/1");
        assert_eq!(assets.character_frames[2].as_str(), "character/2turn1");
        assert_eq!(assets.character_frames[18].as_str(), "character/18turn2");
    }
}
