//! PNG rendering of confusion matrices.

pub mod error;
pub mod font;
pub mod heatmap;


pub use error::RenderError;
pub use heatmap::{
    HeatmapLayout, blues, render_confusion_matrix, tick_label, write_confusion_matrix_png,
};

/// Plot title for the confusion matrix of `model_name`.
pub fn confusion_title(model_name: &str) -> String {
    format!("Confusion Matrix - {model_name}")
}
