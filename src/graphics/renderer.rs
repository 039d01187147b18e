use std::sync::Arc;

use anyhow::{anyhow, Context};
use log::{error, info};
use tracing::{span, Level};

#[cfg(target_os = "macos")]
use vulkano::instance::InstanceCreateFlags;

use vulkano::{
    command_buffer::{
        allocator::StandardCommandBufferAllocator, AutoCommandBufferBuilder, CommandBufferUsage,
        RenderingAttachmentInfo, RenderingInfo,
    },
    device::{Device, DeviceCreateInfo, DeviceExtensions, Features, Queue, QueueCreateInfo},
    image::{view::ImageView, ImageUsage},
    instance::{Instance, InstanceCreateInfo, InstanceExtensions},
    memory::allocator::StandardMemoryAllocator,
    pipeline::{graphics::viewport::Viewport, GraphicsPipeline, Pipeline},
    render_pass::{AttachmentLoadOp, AttachmentStoreOp},
    swapchain::{
        acquire_next_image, Surface, Swapchain, SwapchainCreateInfo, SwapchainPresentInfo,
    },
    sync::{self, GpuFuture},
    Validated, Version, VulkanError, VulkanLibrary,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::{math::Transform, mesh::Mesh};

use super::{
    helpers,
    mesh::{GpuMesh, MeshBuilder},
    shaders,
};

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Draws one immutable mesh with a per-frame model transform.
pub struct Renderer {
    recreate_swapchain: bool,
    window_size: PhysicalSize<u32>,
    swapchain: Arc<Swapchain>,
    previous_frame_end: Option<Box<dyn GpuFuture>>,
    attachment_image_views: Vec<Arc<ImageView>>,
    viewport: Viewport,
    command_buffer_allocator: StandardCommandBufferAllocator,
    queue: Arc<Queue>,
    pipeline: Arc<GraphicsPipeline>,
    mesh: GpuMesh,
    device: Arc<Device>,
}

impl Renderer {
    pub fn new(
        required_extensions: InstanceExtensions,
        window: Arc<Window>,
        mesh: &Mesh,
        cull_back_faces: bool,
    ) -> anyhow::Result<Self> {
        mesh.validate().context("Validating mesh")?;

        let library = VulkanLibrary::new().context("Creating Vulkano Library")?;

        let instance = Instance::new(
            library,
            InstanceCreateInfo {
                #[cfg(target_os = "macos")]
                flags: InstanceCreateFlags::ENUMERATE_PORTABILITY,
                enabled_extensions: InstanceExtensions {
                    #[cfg(target_os = "macos")]
                    khr_portability_enumeration: true,
                    ..required_extensions
                },
                ..Default::default()
            },
        )
        .context("Creating Instance")?;

        let surface = Surface::from_window(instance.clone(), window.clone())
            .context("Getting Surface from Window")?;

        let mut device_extensions = DeviceExtensions {
            #[cfg(target_os = "macos")]
            khr_portability_subset: true,
            khr_swapchain: true,
            ..DeviceExtensions::empty()
        };

        let (physical_device, queue_family_index) =
            helpers::select_physical_device(&instance, &surface, &device_extensions)?;

        info!(
            "Using Device {}, type: {:?}, api version: {}",
            physical_device.properties().device_name,
            physical_device.properties().device_type,
            physical_device.api_version()
        );

        if physical_device.api_version() < Version::V1_3 {
            device_extensions.khr_dynamic_rendering = true;
        }

        let (device, mut queues) = Device::new(
            physical_device,
            DeviceCreateInfo {
                queue_create_infos: vec![QueueCreateInfo {
                    queue_family_index,
                    ..Default::default()
                }],
                enabled_extensions: device_extensions,
                enabled_features: Features {
                    dynamic_rendering: true,
                    ..Features::empty()
                },
                ..Default::default()
            },
        )
        .context("Creating Device and Queues")?;

        let queue = queues.next().context("Getting queue")?;

        let (swapchain, images) = {
            let surface_capabilities = device
                .physical_device()
                .surface_capabilities(&surface, Default::default())
                .context("Getting Surface Capabilities")?;

            let image_format = device
                .physical_device()
                .surface_formats(&surface, Default::default())
                .context("Getting Surface Formats")?
                .first()
                .context("Surface reports no formats")?
                .0;

            Swapchain::new(
                device.clone(),
                surface,
                SwapchainCreateInfo {
                    min_image_count: surface_capabilities.min_image_count.max(2),
                    image_format,
                    image_extent: window.inner_size().into(),
                    image_usage: ImageUsage::COLOR_ATTACHMENT,
                    composite_alpha: surface_capabilities
                        .supported_composite_alpha
                        .into_iter()
                        .next()
                        .context("Finding composite alpha capability")?,
                    ..Default::default()
                },
            )
            .context("Creating Swapchain")?
        };

        let memory_allocator = Arc::new(StandardMemoryAllocator::new_default(device.clone()));

        let vs = shaders::vs_position_color::load(device.clone())
            .context("Loading vertex shader module")?;
        let fs = shaders::fs_basic::load(device.clone()).context("Loading fragment shader module")?;

        let pipeline = helpers::create_pipeline(
            device.clone(),
            vs,
            fs,
            swapchain.image_format(),
            cull_back_faces,
        )?;

        // Viewport is Dynamic so just set it up with 0s initially
        let mut viewport = Viewport {
            offset: [0.0, 0.0],
            extent: [0.0, 0.0],
            depth_range: 0.0..=1.0,
        };

        let attachment_image_views = helpers::window_size_dependent_setup(&images, &mut viewport)?;

        let command_buffer_allocator =
            StandardCommandBufferAllocator::new(device.clone(), Default::default());

        let gpu_mesh = MeshBuilder::from_mesh(mesh)
            .build(memory_allocator)
            .context("Uploading mesh")?;

        info!("Uploaded {mesh:?}");

        let previous_frame_end = Some(sync::now(device.clone()).boxed());

        Ok(Renderer {
            recreate_swapchain: false,
            window_size: window.inner_size(),
            swapchain,
            previous_frame_end,
            attachment_image_views,
            viewport,
            command_buffer_allocator,
            queue,
            pipeline,
            mesh: gpu_mesh,
            device,
        })
    }

    pub fn resized(&mut self, new_size: PhysicalSize<u32>) {
        self.recreate_swapchain = true;
        self.window_size = new_size;
    }

    /// Renders one frame of the mesh transformed by `transform`.
    pub fn draw(&mut self, transform: Transform) -> anyhow::Result<()> {
        let _draw = span!(Level::INFO, "draw").entered();

        let image_extent: [u32; 2] = self.window_size.into();
        if image_extent.contains(&0) {
            return Ok(());
        }

        if let Some(previous_frame_end) = self.previous_frame_end.as_mut() {
            previous_frame_end.cleanup_finished();
        }

        if self.recreate_swapchain {
            let (new_swapchain, new_images) = self
                .swapchain
                .recreate(SwapchainCreateInfo {
                    image_extent,
                    ..self.swapchain.create_info()
                })
                .context("Recreating swapchain")?;

            self.swapchain = new_swapchain;

            self.attachment_image_views =
                helpers::window_size_dependent_setup(&new_images, &mut self.viewport)?;

            self.recreate_swapchain = false;
        }

        let (image_index, suboptimal, acquire_future) =
            match acquire_next_image(self.swapchain.clone(), None).map_err(Validated::unwrap) {
                Ok(r) => r,
                Err(VulkanError::OutOfDate) => {
                    self.recreate_swapchain = true;
                    return Ok(());
                }
                Err(e) => return Err(anyhow!("failed to acquire next image: {e}")),
            };

        if suboptimal {
            self.recreate_swapchain = true;
        }

        let record = span!(Level::INFO, "record commands").entered();

        let mut builder = AutoCommandBufferBuilder::primary(
            &self.command_buffer_allocator,
            self.queue.queue_family_index(),
            CommandBufferUsage::OneTimeSubmit,
        )
        .context("Creating command buffer builder")?;

        builder
            .begin_rendering(RenderingInfo {
                color_attachments: vec![Some(RenderingAttachmentInfo {
                    load_op: AttachmentLoadOp::Clear,
                    store_op: AttachmentStoreOp::Store,
                    clear_value: Some(CLEAR_COLOR.into()),
                    ..RenderingAttachmentInfo::image_view(
                        self.attachment_image_views[image_index as usize].clone(),
                    )
                })],
                ..Default::default()
            })
            .context("Beginning Rendering")?
            .set_viewport(0, [self.viewport.clone()].into_iter().collect())
            .context("Setting Viewport")?
            .bind_pipeline_graphics(self.pipeline.clone())
            .context("Binding Pipeline")?
            .push_constants(
                self.pipeline.layout().clone(),
                0,
                shaders::vs_position_color::PushConstants {
                    trans: transform.into(),
                },
            )
            .context("Pushing Transform")?
            .bind_vertex_buffers(0, self.mesh.vertex_buffer.clone())
            .context("Binding Vertex Buffers")?
            .bind_index_buffer(self.mesh.index_buffer.clone())
            .context("Binding Index Buffer")?
            .draw_indexed(self.mesh.index_count(), 1, 0, 0, 0)
            .context("Drawing")?
            .end_rendering()
            .context("Ending Rendering")?;

        let command_buffer = builder.build().context("Building command buffer")?;

        record.exit();

        let future = self
            .previous_frame_end
            .take()
            .context("Taking from previous future")?
            .join(acquire_future)
            .then_execute(self.queue.clone(), command_buffer)
            .context("Executing Queue")?
            .then_swapchain_present(
                self.queue.clone(),
                SwapchainPresentInfo::swapchain_image_index(self.swapchain.clone(), image_index),
            )
            .then_signal_fence_and_flush();

        match future.map_err(Validated::unwrap) {
            Ok(future) => {
                self.previous_frame_end = Some(future.boxed());
            }
            Err(VulkanError::OutOfDate) => {
                self.recreate_swapchain = true;
                self.previous_frame_end = Some(sync::now(self.device.clone()).boxed());
            }
            Err(e) => {
                error!("failed to flush future: {e}");
                self.previous_frame_end = Some(sync::now(self.device.clone()).boxed());
            }
        }

        Ok(())
    }
}
