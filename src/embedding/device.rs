use candle_core::Device;
use tracing::{debug, warn};

use super::error::EmbeddingError;

/// Picks the device the embedding model runs on.
///
/// GPU backends are only attempted when compiled in (`metal` / `cuda` features);
/// a GPU that fails to initialise falls back to CPU instead of aborting the run.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg_attr(not(any(feature = "metal", feature = "cuda")), allow(unused_mut))]
    let mut failures: Vec<String> = Vec::new();

    if let Some(device) = try_gpu(&mut failures) {
        return Ok(device);
    }

    if failures.is_empty() {
        debug!("No GPU backend compiled, using CPU");
    } else {
        warn!(reason = %failures.join("; "), "GPU unavailable, falling back to CPU");
    }

    Ok(Device::Cpu)
}

/// Short device label for structured log fields.
pub fn device_label(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Cuda(_) => "cuda",
        Device::Metal(_) => "metal",
    }
}

#[allow(unused_variables)]
fn try_gpu(failures: &mut Vec<String>) -> Option<Device> {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                tracing::info!("Using Metal GPU acceleration");
                return Some(device);
            }
            Err(e) => failures.push(format!("metal failed: {e}")),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                tracing::info!("Using CUDA GPU acceleration");
                return Some(device);
            }
            Err(e) => failures.push(format!("cuda failed: {e}")),
        }
    }

    None
}
