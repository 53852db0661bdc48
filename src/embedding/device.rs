use candle_core::Device;
use tracing::{debug, warn};

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

use super::error::EmbeddingError;

/// Selects the compute device for encoder inference.
///
/// GPU backends are tried in the order Metal, CUDA when their cargo features
/// are enabled. Any failure falls back to CPU; the error type is reserved for
/// callers that want to refuse a CPU fallback via [`require_gpu`].
pub fn select_device() -> Result<Device, EmbeddingError> {
    let failures = gpu_failures();

    let reason = if !cfg!(any(feature = "metal", feature = "cuda")) {
        debug!("No GPU features enabled");
        "no GPU backend compiled".to_string()
    } else {
        match failures {
            Ok(device) => return Ok(device),
            Err(list) if list.is_empty() => "no GPU device available".to_string(),
            Err(list) => list.join("; "),
        }
    };

    warn!(reason = %reason, "Encoder falling back to CPU device");
    Ok(Device::Cpu)
}

/// Like [`select_device`] but fails instead of falling back to CPU.
pub fn require_gpu() -> Result<Device, EmbeddingError> {
    match gpu_failures() {
        Ok(device) => Ok(device),
        Err(list) => Err(EmbeddingError::DeviceUnavailable {
            device: "gpu".to_string(),
            reason: if list.is_empty() {
                "no GPU backend compiled".to_string()
            } else {
                list.join("; ")
            },
        }),
    }
}

/// Short label for logs and `Debug` output.
pub fn device_label(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Cuda(_) => "cuda",
        Device::Metal(_) => "metal",
    }
}

#[allow(unused_mut)]
fn gpu_failures() -> Result<Device, Vec<String>> {
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Using Metal GPU acceleration");
                return Ok(device);
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(error = %msg, "Metal device unavailable");
                failures.push(format!("metal failed: {msg}"));
            }
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Using CUDA GPU acceleration");
                return Ok(device);
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(error = %msg, "CUDA device unavailable");
                failures.push(format!("cuda failed: {msg}"));
            }
        }
    }

    Err(failures)
}
