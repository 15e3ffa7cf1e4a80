use engine::{Canvas, Rect, Rgba, Scene, SceneCommand, SceneKey, Vec2};
use tracing::info;

use crate::app::ui::ClipPlayer;

const BACKGROUND_FALLBACK: Rgba = Rgba::rgb(100, 150, 200);
const FLASH_IN_STEP: u8 = 40;
const FLASH_OUT_STEP: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flash {
    Pending,
    Rising(u8),
    Falling(u8),
    Done,
}

impl Flash {
    /// Advances one tick and returns the overlay alpha to draw, if any.
    fn advance(&mut self) -> Option<u8> {
        let alpha = match *self {
            Flash::Done => return None,
            Flash::Pending => FLASH_IN_STEP,
            Flash::Rising(alpha) => alpha.saturating_add(FLASH_IN_STEP),
            Flash::Falling(alpha) => alpha.saturating_sub(FLASH_OUT_STEP),
        };
        *self = match *self {
            Flash::Pending | Flash::Rising(_) if alpha < u8::MAX => Flash::Rising(alpha),
            Flash::Pending | Flash::Rising(_) => Flash::Falling(alpha),
            _ if alpha == 0 => Flash::Done,
            _ => Flash::Falling(alpha),
        };
        Some(alpha)
    }
}

/// Closing cutscene. A white flash greets every entry; the clip itself only
/// runs when the player arrived through the previous section.
pub(crate) struct Scene4 {
    clip: ClipPlayer,
    flash: Flash,
}

impl Scene4 {
    pub(crate) fn new(clip: ClipPlayer) -> Self {
        Self {
            clip,
            flash: Flash::Pending,
        }
    }
}

impl Scene for Scene4 {
    fn load(&mut self) {
        self.clip.stop();
        self.flash = Flash::Pending;
    }

    fn tick(&mut self, canvas: &mut dyn Canvas, _cursor: Option<Vec2>) -> SceneCommand {
        self.clip.tick();
        self.clip.draw(canvas, BACKGROUND_FALLBACK);
        if let Some(alpha) = self.flash.advance() {
            let (width, height) = (canvas.width(), canvas.height());
            canvas.fill_rect(
                Rect::new(0.0, 0.0, width, height),
                Rgba::WHITE.with_alpha(alpha),
            );
        }
        SceneCommand::None
    }

    fn enter(&mut self, previous: SceneKey) {
        self.flash = Flash::Pending;
        if previous == SceneKey::Scene3 {
            info!("cutscene_armed");
            self.clip.play();
        }
    }
}
