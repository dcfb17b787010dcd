//! Error types for AION.
//!
//! The scene itself never fails: bad shape ids fall back, missing snapshots
//! skip a step. Only loading configuration and bringing up the window and GPU
//! can return errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or validating a [`SceneConfig`](crate::config::SceneConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a GPU with Vulkan/Metal/DX12/WebGPU support is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable configuration for this adapter.
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
    /// The device ran out of memory while presenting a frame.
    #[error("GPU out of memory")]
    OutOfMemory,
}

/// Errors from the native viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
