use std::sync::Arc;

use glyphon::{
    Attrs, Buffer as GlyphonBuffer, Cache, Color as GlyphonColor, Family, FontSystem, Metrics,
    Resolution, Shaping, SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer, Viewport,
    Wrap,
};
use wgpu::{
    include_wgsl, util::DeviceExt, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType, BufferBindingType, BufferUsages,
    CommandEncoderDescriptor, CompositeAlphaMode, DeviceDescriptor, Features, FragmentState,
    Instance, InstanceDescriptor, Limits, LoadOp, MultisampleState, Operations,
    PipelineLayoutDescriptor, PresentMode, PrimitiveState, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, RequestAdapterOptions,
    ShaderStages, StoreOp, Surface, SurfaceConfiguration, SurfaceError, TextureFormat,
    TextureUsages, TextureViewDescriptor, VertexState,
};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, ModifiersState, NamedKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::core::FontSetting;
use crate::keybinding::key::{Key as PlumeKey, Modifiers};
use crate::keybinding::KeyEvent;
use crate::state::EditorState;

use super::layout::{Cell, CellStyle, Screen};
use super::traits::{Frontend, FrontendError};

const LINE_SPACING: f32 = 1.25;
const CURSOR_WIDTH: f32 = 2.0;

type Rgba = [f32; 4];

#[derive(Debug, Clone, Copy)]
struct Theme {
    background: Rgba,
    foreground: GlyphonColor,
    dimmed: GlyphonColor,
    selection: Rgba,
    bar: Rgba,
    accent: Rgba,
    accent_fg: GlyphonColor,
    status: Rgba,
    dialog: Rgba,
    field: Rgba,
    error: GlyphonColor,
    cursor: Rgba,
}

fn hex_to_rgba(hex: u32) -> Rgba {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    [r, g, b, 1.0]
}

fn hex_to_color(hex: u32) -> GlyphonColor {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    GlyphonColor::rgb(r, g, b)
}

impl Default for Theme {
    fn default() -> Self {
        // Modus Operandi
        Self {
            background: hex_to_rgba(0xffffff),
            foreground: hex_to_color(0x000000),
            dimmed: hex_to_color(0x808080),
            selection: hex_to_rgba(0xbdbdbd),
            bar: hex_to_rgba(0xe0e0e0),
            accent: hex_to_rgba(0x3548cf),
            accent_fg: hex_to_color(0xffffff),
            status: hex_to_rgba(0xc4c4c4),
            dialog: hex_to_rgba(0xf2f2f2),
            field: hex_to_rgba(0xffffff),
            error: hex_to_color(0xa60000),
            cursor: hex_to_rgba(0x000000),
        }
    }
}

impl Theme {
    /// Foreground color and optional background fill for a cell style.
    fn colors(&self, style: CellStyle) -> (GlyphonColor, Option<Rgba>) {
        match style {
            CellStyle::Text => (self.foreground, None),
            CellStyle::Selection => (self.foreground, Some(self.selection)),
            CellStyle::Highlight(rgb) => (
                self.foreground,
                Some([
                    rgb.0 as f32 / 255.0,
                    rgb.1 as f32 / 255.0,
                    rgb.2 as f32 / 255.0,
                    1.0,
                ]),
            ),
            CellStyle::Filler => (self.dimmed, None),
            CellStyle::MenuBar | CellStyle::MenuItem => (self.foreground, Some(self.bar)),
            CellStyle::MenuSeparator => (self.dimmed, Some(self.bar)),
            CellStyle::MenuTitleOpen | CellStyle::MenuItemSelected | CellStyle::DialogSelected => {
                (self.accent_fg, Some(self.accent))
            }
            CellStyle::DialogTitle => (self.accent_fg, Some(self.accent)),
            CellStyle::Status => (self.foreground, Some(self.status)),
            CellStyle::Dialog => (self.foreground, Some(self.dialog)),
            CellStyle::DialogField => (self.foreground, Some(self.field)),
            CellStyle::DialogHint => (self.dimmed, Some(self.dialog)),
            CellStyle::DialogError => (self.error, Some(self.dialog)),
        }
    }
}

/// Consecutive cells of one style: start column, width in cells, text.
#[derive(Debug, Clone, PartialEq)]
struct StyleRun {
    col: u16,
    width: u16,
    style: CellStyle,
    text: String,
}

fn style_runs(row: &[Cell]) -> Vec<StyleRun> {
    let mut runs: Vec<StyleRun> = Vec::new();
    for (col, cell) in row.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.style == cell.style => run.width += 1,
            _ => runs.push(StyleRun {
                col: col as u16,
                width: 1,
                style: cell.style,
                text: String::new(),
            }),
        }
        if cell.ch != '\0' {
            if let Some(run) = runs.last_mut() {
                run.text.push(cell.ch);
            }
        }
    }
    runs
}

fn family(name: &str) -> Family<'_> {
    if name.eq_ignore_ascii_case("monospace") {
        Family::Monospace
    } else {
        Family::Name(name)
    }
}

fn font_attrs(font: &FontSetting) -> Attrs<'_> {
    Attrs::new().family(family(&font.family))
}

fn is_shifted_symbol(ch: char) -> bool {
    // Characters that require Shift on a US keyboard layout
    matches!(
        ch,
        '!' | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '&'
            | '*'
            | '('
            | ')'
            | '_'
            | '+'
            | '{'
            | '}'
            | '|'
            | ':'
            | '"'
            | '<'
            | '>'
            | '?'
            | '~'
    )
}

/// Translates a winit key into the editor's key model, matching what the
/// terminal frontend reports for the same keystroke.
fn convert_key(logical_key: &Key, state: ModifiersState) -> Option<KeyEvent> {
    let mut modifiers = Modifiers::empty();
    if state.control_key() {
        modifiers |= Modifiers::CTRL;
    }
    if state.alt_key() {
        modifiers |= Modifiers::ALT;
    }
    if state.shift_key() {
        modifiers |= Modifiers::SHIFT;
    }

    let key = match logical_key {
        Key::Named(named) => match named {
            NamedKey::Backspace => PlumeKey::Backspace,
            NamedKey::Tab => PlumeKey::Tab,
            NamedKey::Enter => PlumeKey::Enter,
            NamedKey::Escape => PlumeKey::Escape,
            NamedKey::Space => PlumeKey::Char(' '),
            NamedKey::ArrowUp => PlumeKey::Up,
            NamedKey::ArrowDown => PlumeKey::Down,
            NamedKey::ArrowLeft => PlumeKey::Left,
            NamedKey::ArrowRight => PlumeKey::Right,
            NamedKey::Home => PlumeKey::Home,
            NamedKey::End => PlumeKey::End,
            NamedKey::PageUp => PlumeKey::PageUp,
            NamedKey::PageDown => PlumeKey::PageDown,
            NamedKey::Insert => PlumeKey::Insert,
            NamedKey::Delete => PlumeKey::Delete,
            NamedKey::F1 => PlumeKey::F(1),
            NamedKey::F2 => PlumeKey::F(2),
            NamedKey::F3 => PlumeKey::F(3),
            NamedKey::F4 => PlumeKey::F(4),
            NamedKey::F5 => PlumeKey::F(5),
            NamedKey::F6 => PlumeKey::F(6),
            NamedKey::F7 => PlumeKey::F(7),
            NamedKey::F8 => PlumeKey::F(8),
            NamedKey::F9 => PlumeKey::F(9),
            NamedKey::F10 => PlumeKey::F(10),
            NamedKey::F11 => PlumeKey::F(11),
            NamedKey::F12 => PlumeKey::F(12),
            _ => return None,
        },
        Key::Character(c) => {
            let ch = c.chars().next()?;

            // Shift that produced the character is not a modifier, except
            // on chords: Ctrl+Shift+S arrives as Ctrl + 'S'.
            if ch.is_ascii_uppercase() {
                if modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
                    modifiers |= Modifiers::SHIFT;
                    PlumeKey::Char(ch.to_ascii_lowercase())
                } else {
                    modifiers.remove(Modifiers::SHIFT);
                    PlumeKey::Char(ch)
                }
            } else if is_shifted_symbol(ch) {
                modifiers.remove(Modifiers::SHIFT);
                PlumeKey::Char(ch)
            } else if !ch.is_ascii() {
                modifiers.remove(Modifiers::SHIFT);
                PlumeKey::Char(ch)
            } else {
                PlumeKey::Char(ch)
            }
        }
        _ => return None,
    };

    Some(KeyEvent { key, modifiers })
}

pub struct GuiFrontend {
    window_size: (u32, u32),
    font: FontSetting,
}

impl GuiFrontend {
    pub fn new(window_size: (u32, u32), font: FontSetting) -> Self {
        Self { window_size, font }
    }
}

impl Frontend for GuiFrontend {
    fn init(&mut self) -> Result<(), FrontendError> {
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), FrontendError> {
        Ok(())
    }

    /// Estimated from the font size; the real grid is measured once the
    /// window exists.
    fn size(&self) -> (u16, u16) {
        let cell_width = self.font.size * 0.6;
        let cell_height = self.font.size * LINE_SPACING;
        (
            (self.window_size.0 as f32 / cell_width) as u16,
            (self.window_size.1 as f32 / cell_height) as u16,
        )
    }

    fn run(self, state: EditorState) -> Result<(), FrontendError> {
        let event_loop = EventLoop::new().map_err(|e| FrontendError::Gui(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = GuiApp::new(state, self.window_size);

        event_loop
            .run_app(&mut app)
            .map_err(|e| FrontendError::Gui(e.to_string()))?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn render(&mut self, _state: &EditorState) -> Result<(), FrontendError> {
        Ok(())
    }
}

struct GpuState {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    rect_pipeline: RenderPipeline,
    rect_bind_group_layout: BindGroupLayout,
}

struct TextState {
    font_system: FontSystem,
    swash_cache: SwashCache,
    atlas: TextAtlas,
    text_renderer: TextRenderer,
    viewport: Viewport,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct RectUniforms {
    rect: [f32; 4],
    color: [f32; 4],
    screen_size: [f32; 2],
    _padding: [f32; 2],
}

struct GuiApp {
    state: EditorState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    text: Option<TextState>,
    theme: Theme,
    modifiers: ModifiersState,
    window_size: (u32, u32),
    title: String,
    /// Font the cell metrics were measured with.
    font: FontSetting,
    cols: u16,
    rows: u16,
    cell_width: f32,
    cell_height: f32,
    error: Option<FrontendError>,
}

impl GuiApp {
    fn new(state: EditorState, window_size: (u32, u32)) -> Self {
        let font = state.font.clone();
        Self {
            state,
            window: None,
            gpu: None,
            text: None,
            theme: Theme::default(),
            modifiers: ModifiersState::empty(),
            window_size,
            title: String::new(),
            cell_width: font.size * 0.6,
            cell_height: (font.size * LINE_SPACING).ceil(),
            font,
            cols: 80,
            rows: 24,
            error: None,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<(), FrontendError> {
        let size = window.inner_size();

        let instance = Instance::new(InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| FrontendError::Gui(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| FrontendError::Gui("no suitable graphics adapter".to_string()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &DeviceDescriptor {
                label: None,
                required_features: Features::empty(),
                required_limits:
                    Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| FrontendError::Gui(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let swapchain_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8UnormSrgb);

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: swapchain_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::Fifo,
            alpha_mode: CompositeAlphaMode::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let rect_shader = device.create_shader_module(include_wgsl!("rect.wgsl"));

        let rect_bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Rect Bind Group Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let rect_pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Rect Pipeline Layout"),
            bind_group_layouts: &[&rect_bind_group_layout],
            push_constant_ranges: &[],
        });

        let rect_pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Rect Pipeline"),
            layout: Some(&rect_pipeline_layout),
            vertex: VertexState {
                module: &rect_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &rect_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: swapchain_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState::default(),
            depth_stencil: None,
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let mut font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(&device);
        let mut atlas = TextAtlas::new(&device, &queue, &cache, swapchain_format);
        let text_renderer =
            TextRenderer::new(&mut atlas, &device, MultisampleState::default(), None);
        let viewport = Viewport::new(&device, &cache);

        let (cell_width, cell_height) = Self::measure_cell(&mut font_system, &self.font);
        self.cell_width = cell_width;
        self.cell_height = cell_height;

        self.gpu = Some(GpuState {
            surface,
            config,
            device,
            queue,
            rect_pipeline,
            rect_bind_group_layout,
        });
        self.text = Some(TextState {
            font_system,
            swash_cache,
            atlas,
            text_renderer,
            viewport,
        });
        Ok(())
    }

    /// Advance of an `M` in the font, and the line height.
    fn measure_cell(font_system: &mut FontSystem, font: &FontSetting) -> (f32, f32) {
        let cell_height = (font.size * LINE_SPACING).ceil();
        let metrics = Metrics::new(font.size, cell_height);
        let mut buffer = GlyphonBuffer::new(font_system, metrics);
        buffer.set_size(font_system, Some(1000.0), Some(cell_height));
        buffer.set_text(font_system, "M", font_attrs(font), Shaping::Advanced);

        let width = buffer
            .layout_runs()
            .next()
            .and_then(|run| run.glyphs.first().map(|glyph| glyph.w))
            .filter(|w| *w > 0.0)
            .unwrap_or(font.size * 0.6);
        (width, cell_height)
    }

    /// Picks up a font chosen in the Font dialog.
    fn sync_font(&mut self) {
        if self.state.font == self.font {
            return;
        }
        self.font = self.state.font.clone();
        log::info!("font changed to {} {}pt", self.font.family, self.font.size);
        if let Some(text) = &mut self.text {
            let (cell_width, cell_height) = Self::measure_cell(&mut text.font_system, &self.font);
            self.cell_width = cell_width;
            self.cell_height = cell_height;
        }
        let size = self
            .gpu
            .as_ref()
            .map(|gpu| PhysicalSize::new(gpu.config.width, gpu.config.height));
        if let Some(size) = size {
            self.update_grid(size);
        }
    }

    fn sync_title(&mut self) {
        let title = self.state.title();
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn update_grid(&mut self, size: PhysicalSize<u32>) {
        self.cols = (size.width as f32 / self.cell_width) as u16;
        self.rows = (size.height as f32 / self.cell_height) as u16;
        self.state.set_dimensions(self.cols, self.rows);
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }

        if let Some(gpu) = &mut self.gpu {
            gpu.config.width = size.width;
            gpu.config.height = size.height;
            gpu.surface.configure(&gpu.device, &gpu.config);
        }
        self.update_grid(size);
    }

    fn create_rect_bind_group(gpu: &GpuState, uniforms: RectUniforms) -> BindGroup {
        let buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Rect Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniforms]),
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            });

        gpu.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Rect Bind Group"),
            layout: &gpu.rect_bind_group_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    fn render(&mut self) -> Result<(), FrontendError> {
        let screen = Screen::compose(&self.state, self.cols, self.rows);
        let theme = self.theme;
        let cell_width = self.cell_width;
        let cell_height = self.cell_height;

        let (gpu, text) = match (&mut self.gpu, &mut self.text) {
            (Some(gpu), Some(text)) => (gpu, text),
            _ => return Ok(()),
        };

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return Ok(());
            }
            Err(e) => return Err(FrontendError::Render(e.to_string())),
        };
        let view = frame.texture.create_view(&TextureViewDescriptor::default());

        let pixel_width = gpu.config.width as f32;
        let pixel_height = gpu.config.height as f32;
        let rect = |x: f32, y: f32, w: f32, h: f32, color: Rgba| RectUniforms {
            rect: [x, y, w, h],
            color,
            screen_size: [pixel_width, pixel_height],
            _padding: [0.0, 0.0],
        };

        let mut rect_bind_groups: Vec<BindGroup> = Vec::new();
        let mut spans: Vec<(String, GlyphonColor)> = Vec::new();

        for row in 0..screen.height() {
            let y = row as f32 * cell_height;
            for run in style_runs(screen.row(row)) {
                let (fg, bg) = theme.colors(run.style);
                if let Some(bg) = bg {
                    let uniforms = rect(
                        run.col as f32 * cell_width,
                        y,
                        run.width as f32 * cell_width,
                        cell_height,
                        bg,
                    );
                    rect_bind_groups.push(Self::create_rect_bind_group(gpu, uniforms));
                }
                spans.push((run.text, fg));
            }
            spans.push(("\n".to_string(), theme.foreground));
        }

        if let Some((col, row)) = screen.cursor {
            let uniforms = rect(
                col as f32 * cell_width,
                row as f32 * cell_height,
                CURSOR_WIDTH,
                cell_height,
                theme.cursor,
            );
            rect_bind_groups.push(Self::create_rect_bind_group(gpu, uniforms));
        }

        text.viewport.update(
            &gpu.queue,
            Resolution {
                width: gpu.config.width,
                height: gpu.config.height,
            },
        );

        let metrics = Metrics::new(self.font.size, cell_height);
        let attrs = font_attrs(&self.font);
        let mut buffer = GlyphonBuffer::new(&mut text.font_system, metrics);
        buffer.set_size(&mut text.font_system, Some(pixel_width), Some(pixel_height));
        buffer.set_wrap(&mut text.font_system, Wrap::None);
        buffer.set_rich_text(
            &mut text.font_system,
            spans
                .iter()
                .map(|(s, color)| (s.as_str(), attrs.clone().color(*color))),
            attrs.clone(),
            Shaping::Advanced,
        );

        text.text_renderer
            .prepare(
                &gpu.device,
                &gpu.queue,
                &mut text.font_system,
                &mut text.atlas,
                &text.viewport,
                [TextArea {
                    buffer: &buffer,
                    left: 0.0,
                    top: 0.0,
                    scale: 1.0,
                    bounds: TextBounds {
                        left: 0,
                        top: 0,
                        right: gpu.config.width as i32,
                        bottom: gpu.config.height as i32,
                    },
                    default_color: theme.foreground,
                    custom_glyphs: &[],
                }],
                &mut text.swash_cache,
            )
            .map_err(|e| FrontendError::Render(e.to_string()))?;

        let mut encoder = gpu
            .device
            .create_command_encoder(&CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color {
                            r: theme.background[0] as f64,
                            g: theme.background[1] as f64,
                            b: theme.background[2] as f64,
                            a: theme.background[3] as f64,
                        }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Backgrounds and the caret go under the text.
            pass.set_pipeline(&gpu.rect_pipeline);
            for bind_group in &rect_bind_groups {
                pass.set_bind_group(0, bind_group, &[]);
                pass.draw(0..6, 0..1);
            }

            text.text_renderer
                .render(&text.atlas, &text.viewport, &mut pass)
                .map_err(|e| FrontendError::Render(e.to_string()))?;
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();

        text.atlas.trim();
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: FrontendError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for GuiApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        self.title = self.state.title();
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.window_size.0, self.window_size.1));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, FrontendError::Gui(e.to_string())),
        };

        if let Err(e) = self.init_gpu(window.clone()) {
            return self.fail(event_loop, e);
        }

        self.update_grid(window.inner_size());
        self.window = Some(window);
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.resize(size);
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::warn!("frame dropped: {}", e);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let Some(key) = convert_key(&event.logical_key, self.modifiers) {
                    self.state.handle_key(key);
                }
                if self.state.should_quit {
                    event_loop.exit();
                    return;
                }
                self.sync_font();
                self.sync_title();
                self.request_redraw();
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }
            WindowEvent::DroppedFile(path) => {
                self.state.open_file(&path);
                self.sync_title();
                self.request_redraw();
            }
            WindowEvent::Focused(true) => self.request_redraw(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_plain_and_chorded_letters() {
        let upper = convert_key(&Key::Character("A".into()), ModifiersState::SHIFT);
        assert_eq!(upper, Some(KeyEvent::char('A')));

        let save_as = convert_key(
            &Key::Character("S".into()),
            ModifiersState::CONTROL | ModifiersState::SHIFT,
        );
        assert_eq!(save_as, Some(KeyEvent::ctrl_shift('s')));

        let menu = convert_key(&Key::Character("f".into()), ModifiersState::ALT);
        assert_eq!(menu, Some(KeyEvent::alt('f')));
    }

    #[test]
    fn test_convert_shifted_symbols_and_named_keys() {
        assert_eq!(
            convert_key(&Key::Character("?".into()), ModifiersState::SHIFT),
            Some(KeyEvent::char('?'))
        );
        assert_eq!(
            convert_key(&Key::Named(NamedKey::F12), ModifiersState::empty()),
            Some(KeyEvent::plain(PlumeKey::F(12)))
        );
        assert_eq!(
            convert_key(&Key::Named(NamedKey::ArrowLeft), ModifiersState::SHIFT),
            Some(KeyEvent::shift(PlumeKey::Left))
        );
        assert_eq!(
            convert_key(&Key::Named(NamedKey::CapsLock), ModifiersState::empty()),
            None
        );
    }

    #[test]
    fn test_style_runs_group_cells() {
        let cell = |ch, style| Cell { ch, style };
        let row = [
            cell('a', CellStyle::Text),
            cell('b', CellStyle::Text),
            cell('日', CellStyle::Selection),
            cell('\0', CellStyle::Selection),
            cell(' ', CellStyle::Status),
        ];
        let runs = style_runs(&row);
        assert_eq!(runs.len(), 3);
        assert_eq!((runs[0].col, runs[0].width, runs[0].text.as_str()), (0, 2, "ab"));
        assert_eq!((runs[1].col, runs[1].width, runs[1].text.as_str()), (2, 2, "日"));
        assert_eq!(runs[2].style, CellStyle::Status);
    }

    #[test]
    fn test_every_bar_style_has_a_background() {
        let theme = Theme::default();
        for style in [
            CellStyle::MenuBar,
            CellStyle::Status,
            CellStyle::Dialog,
            CellStyle::DialogSelected,
        ] {
            assert!(theme.colors(style).1.is_some());
        }
        assert!(theme.colors(CellStyle::Text).1.is_none());
    }
}
