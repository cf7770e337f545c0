use super::helpers;
use odar_core::mesh::{BakedMesh, DeviceVertex};
use odar_core::{
    FrameSnapshot, AMBIENT_INTENSITY, BACK_LIGHT_INTENSITY, BACK_LIGHT_POSITION,
    KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION,
};
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DeviceUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) eye: [f32; 4],
    pub(crate) key_light: [f32; 4],
    pub(crate) back_light: [f32; 4],
    pub(crate) params: [f32; 4],
}

impl DeviceUniforms {
    pub(crate) fn from_snapshot(snap: &FrameSnapshot) -> Self {
        let [kx, ky, kz] = KEY_LIGHT_POSITION;
        let [bx, by, bz] = BACK_LIGHT_POSITION;
        Self {
            view_proj: (snap.projection * snap.view).to_cols_array_2d(),
            model: snap.device_model.to_cols_array_2d(),
            eye: snap.eye.extend(1.0).to_array(),
            key_light: [kx, ky, kz, KEY_LIGHT_INTENSITY],
            back_light: [bx, by, bz, BACK_LIGHT_INTENSITY],
            params: [AMBIENT_INTENSITY, snap.indicator_intensity, 0.0, 0.0],
        }
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x3,
    3 => Float32x4,
    4 => Float32x4,
];

pub(crate) struct DeviceResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_device_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    mesh: &BakedMesh,
) -> DeviceResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("device_shader"),
        source: wgpu::ShaderSource::Wgsl(odar_core::DEVICE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("device_bgl"),
        entries: &[helpers::uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("device_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("device_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<DeviceVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // panels are thin boxes seen from every side; keep both faces
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_state(true)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &helpers::color_target(color_format, None),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("device_vertices"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("device_indices"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = helpers::uniform_buffer::<DeviceUniforms>(device, "device_uniforms");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("device_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    DeviceResources {
        pipeline,
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

impl DeviceResources {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
