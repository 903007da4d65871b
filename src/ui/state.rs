use log::debug;

use crate::math::FlatPattern;
use crate::params::ParameterInputs;
use crate::remote::{FetchResult, PatternImage};

/// What the pattern image area currently shows.
pub struct PatternView {
    pub texture: Option<egui::TextureHandle>,
    /// Mirrors the fetcher: the newest request is still unanswered.
    pub loading: bool,
}

impl PatternView {
    fn new() -> Self {
        Self {
            texture: None,
            loading: false,
        }
    }

    pub fn receive(&mut self, ctx: &egui::Context, result: FetchResult) {
        match result {
            FetchResult::Image(image) => {
                self.texture = Some(load_pattern_texture(ctx, &image));
            }
            FetchResult::Failed(message) => {
                debug!("dropping pattern image: {message}");
                self.texture = None;
            }
        }
    }
}

fn load_pattern_texture(ctx: &egui::Context, image: &PatternImage) -> egui::TextureHandle {
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.pixels);
    ctx.load_texture("pattern", color_image, egui::TextureOptions::LINEAR)
}

pub struct UiState {
    pub inputs: ParameterInputs,
    pub profile: FlatPattern,
    pub pattern: PatternView,

    pub vsync_enabled: bool,
    pub show_profile: bool,
    pub show_stats: bool,
}

impl UiState {
    pub fn new(inputs: ParameterInputs, vsync_enabled: bool) -> Self {
        let profile = FlatPattern::compute(&inputs.parse());
        Self {
            inputs,
            profile,
            pattern: PatternView::new(),

            vsync_enabled,
            show_profile: true,
            show_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_image() -> PatternImage {
        PatternImage {
            width: 2,
            height: 1,
            pixels: vec![255, 0, 0, 255, 0, 0, 255, 255],
        }
    }

    #[test]
    fn image_arrives_after_failure() {
        let ctx = egui::Context::default();
        let mut view = PatternView::new();

        view.receive(&ctx, FetchResult::Failed("HTTP 500".into()));
        assert!(view.texture.is_none());

        view.receive(&ctx, FetchResult::Image(tiny_image()));
        assert_eq!(view.texture.as_ref().map(|t| t.size()), Some([2, 1]));
    }

    #[test]
    fn failure_clears_the_image() {
        let ctx = egui::Context::default();
        let mut view = PatternView::new();
        view.receive(&ctx, FetchResult::Image(tiny_image()));
        view.receive(&ctx, FetchResult::Failed("connection refused".into()));
        assert!(view.texture.is_none());
    }

    #[test]
    fn profile_follows_initial_inputs() {
        let state = UiState::new(ParameterInputs::new("4", "2", "90", "0.25"), true);
        assert_eq!(state.profile.edge_distance, 6.0);
        assert!(!state.profile.samples.is_empty());
    }
}
