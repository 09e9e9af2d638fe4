use egui_wgpu::ScreenDescriptor;

use crate::renderer::camera::CameraState;
use crate::renderer::renderer::Renderer;
use crate::renderer::uniforms::{CameraUniform, DrawUniform};
use crate::scene::{SceneElement, Surface};
use crate::texture::TextureTable;

/// Everything one frame draws, passed explicitly instead of living in globals
pub struct FrameContext<'a> {
    pub camera: &'a CameraState,
    pub elements: &'a [SceneElement],
    pub textures: &'a TextureTable,
    pub clear_color: [f32; 3],
}

/// Run `draw` between egui's texture uploads and frees.
///
/// egui sends each texture delta exactly once, so uploads happen before `draw`
/// can fail and frees happen whatever `draw` returns.
pub(crate) fn with_texture_updates<S, T, R>(
    state: &mut S,
    set: &[(egui::TextureId, T)],
    free: &[egui::TextureId],
    mut upload: impl FnMut(&mut S, egui::TextureId, &T),
    draw: impl FnOnce(&mut S) -> R,
    mut release: impl FnMut(&mut S, egui::TextureId),
) -> R {
    for (id, delta) in set {
        upload(state, *id, delta);
    }
    let result = draw(state);
    for id in free {
        release(state, *id);
    }
    result
}

impl Renderer {
    pub fn render(
        &mut self,
        frame: &FrameContext<'_>,
        paint_jobs: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        screen_descriptor: ScreenDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        with_texture_updates(
            self,
            &textures_delta.set,
            &textures_delta.free,
            |renderer, id, delta| {
                renderer
                    .egui_renderer
                    .update_texture(&renderer.device, &renderer.queue, id, delta);
            },
            |renderer| renderer.draw_frame(frame, &paint_jobs, &screen_descriptor),
            |renderer, id| renderer.egui_renderer.free_texture(&id),
        )
    }

    fn draw_frame(
        &mut self,
        frame: &FrameContext<'_>,
        paint_jobs: &[egui::ClippedPrimitive],
        screen_descriptor: &ScreenDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        // Skip rendering if window size is invalid (minimized, not ready, etc.)
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        let aspect = self.config.width as f32 / self.config.height as f32;
        let camera_uniform = CameraUniform::new(frame.camera, aspect);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera_uniform));

        self.ensure_draw_capacity(frame.elements.len());
        if !frame.elements.is_empty() {
            let stride = self.draw_stride as usize;
            let mut bytes = vec![0u8; stride * frame.elements.len()];
            for (i, element) in frame.elements.iter().enumerate() {
                let uniform = DrawUniform::from_element(element);
                let slot = &mut bytes[i * stride..i * stride + size_of::<DrawUniform>()];
                slot.copy_from_slice(bytemuck::bytes_of(&uniform));
            }
            self.queue.write_buffer(&self.draw_buffer, 0, &bytes);
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: frame.clear_color[0] as f64,
                            g: frame.clear_color[1] as f64,
                            b: frame.clear_color[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for (i, element) in frame.elements.iter().enumerate() {
                let offset = (i as u64 * self.draw_stride) as wgpu::DynamicOffset;
                render_pass.set_bind_group(1, &self.draw_bind_group, &[offset]);

                let texture_bind_group = match element.surface {
                    Surface::Textured(key) => frame
                        .textures
                        .bind_group(key)
                        .unwrap_or(&self.white_bind_group),
                    Surface::Color(_) => &self.white_bind_group,
                };
                render_pass.set_bind_group(2, texture_bind_group, &[]);

                let range = self.meshes[element.primitive.index()];
                render_pass.draw_indexed(
                    range.index_start..range.index_start + range.index_count,
                    0,
                    0..1,
                );
            }
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            paint_jobs,
            screen_descriptor,
        );

        {
            let mut egui_rpass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut egui_rpass, paint_jobs, screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<String>);

    fn run(
        set: &[(egui::TextureId, &str)],
        free: &[egui::TextureId],
        ok: bool,
    ) -> (Log, Result<(), ()>) {
        let mut log = Log::default();
        let result = with_texture_updates(
            &mut log,
            set,
            free,
            |log, id, name| log.0.push(format!("upload {id:?} {name}")),
            |log| {
                log.0.push("draw".to_string());
                if ok { Ok(()) } else { Err(()) }
            },
            |log, id| log.0.push(format!("free {id:?}")),
        );
        (log, result)
    }

    #[test]
    fn uploads_land_even_when_the_frame_is_skipped() {
        let atlas = egui::TextureId::Managed(0);
        let stale = egui::TextureId::Managed(7);
        let (log, result) = run(&[(atlas, "font atlas")], &[stale], false);

        assert!(result.is_err());
        assert_eq!(
            log.0,
            vec![
                format!("upload {atlas:?} font atlas"),
                "draw".to_string(),
                format!("free {stale:?}"),
            ]
        );
    }

    #[test]
    fn successful_frames_upload_draw_then_free() {
        let a = egui::TextureId::Managed(1);
        let b = egui::TextureId::Managed(2);
        let (log, result) = run(&[(a, "a"), (b, "b")], &[a], true);

        assert!(result.is_ok());
        assert_eq!(log.0.len(), 4);
        assert_eq!(log.0[2], "draw");
        assert_eq!(log.0[3], format!("free {a:?}"));
    }
}
