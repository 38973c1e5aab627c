//! Audio device setup and the real-time render callback

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{PushError, RingBuffer};

use pluck_dsp::{
    host::{Controller, Rack},
    RackConfig, MAX_BLOCK_SIZE,
};

use super::ui::{UiApp, UiInit, VIS_BUFFER_SIZE};

/// Capacity in visualization windows for the audio→UI ring
const SCOPE_RING_WINDOWS: usize = 16;

pub struct Pluckbox {
    config: RackConfig,
}

impl Pluckbox {
    pub fn new(config: RackConfig) -> Self {
        Self { config }
    }

    /// Open the default output device, start the rack and hand the terminal
    /// to the UI until it quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;
        tracing::info!(sample_rate, channels, "output device ready");

        let config = self.config.sample_rate(sample_rate);
        let (controller, control_rx) = Controller::channel(config.queue_capacity);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * SCOPE_RING_WINDOWS);

        let mut rack = Rack::standard(&config, control_rx);
        let init = UiInit {
            sample_rate: config.effective_sample_rate(),
            voices: rack.voice_names().collect(),
            effects: rack.effect_names().collect(),
        };

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE * 2];
        let stream = device
            .build_output_stream(
                &stream_config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames * 2];
                        rack.render(block);

                        // Rack is stereo; extra device channels repeat the pair
                        let out_off = frames_written * channels;
                        for (i, frame) in block.chunks_exact(2).enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = frame[ch % 2];
                            }
                        }

                        // Left channel feeds the scope; drop on overflow
                        for frame in block.chunks_exact(2) {
                            if let Err(PushError::Full(_)) = scope_tx.push(frame[0]) {
                                break;
                            }
                        }

                        frames_written += frames;
                    }
                },
                |err| tracing::error!(%err, "stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(controller, scope_rx, init).run(&mut terminal);
        ratatui::restore();

        tracing::info!("shutting down");
        result
    }
}
