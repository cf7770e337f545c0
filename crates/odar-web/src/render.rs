mod device;
mod helpers;
mod label;
mod targets;

use crate::label::LabelImage;
use device::{create_device_resources, DeviceResources, DeviceUniforms};
use label::{create_label_resources, LabelResources, LabelUniforms};
use odar_core::mesh::BakedMesh;
use odar_core::scene::Rgb;
use odar_core::{FrameSnapshot, BACKGROUND_RGB};
use targets::RenderTargets;
use web_sys as web;
use wgpu;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // render views use the sRGB variant even when the canvas only offers linear formats
    view_format: wgpu::TextureFormat,
    targets: RenderTargets,
    device_pass: DeviceResources,
    label_pass: LabelResources,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        mesh: &BakedMesh,
        label: &LabelImage,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("odar_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let view_format = format.add_srgb_suffix();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format {:?} (view {:?})",
            width,
            height,
            format,
            view_format
        );

        let targets = RenderTargets::new(&device, width, height);
        let device_pass = create_device_resources(&device, view_format, mesh);
        let label_pass = create_label_resources(&device, &queue, view_format, label);

        // clear color is specified in sRGB; the render view is sRGB so pass linear values
        let [r, g, b] = Rgb::from_hex(BACKGROUND_RGB).to_array();
        let clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            targets,
            device_pass,
            label_pass,
            width,
            height,
            clear_color,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
            log::info!("[gpu] resized to {}x{}", width, height);
        }
    }

    /// Reapply the surface configuration; also the recovery path for a lost surface.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        if self.targets.size() != (self.width, self.height) {
            self.targets.recreate(&self.device, self.width, self.height);
        }
    }

    pub fn render(&mut self, snap: &FrameSnapshot) -> Result<(), wgpu::SurfaceError> {
        let (w, h) = snap.surface_size;
        self.resize_if_needed(w, h);

        self.queue.write_buffer(
            &self.device_pass.uniform_buffer,
            0,
            bytemuck::bytes_of(&DeviceUniforms::from_snapshot(snap)),
        );
        self.queue.write_buffer(
            &self.label_pass.uniform_buffer,
            0,
            bytemuck::bytes_of(&LabelUniforms::from_snapshot(snap)),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.device_pass.draw(&mut rpass);
            self.label_pass.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
