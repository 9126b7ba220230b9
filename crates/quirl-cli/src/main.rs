//! quirl - stylized QR rendering from the terminal
//!
//! Usage:
//!   quirl render <text> [options]   Encode and render to SVG/PNG/JSON
//!   quirl preview [text]            Interactive style preview TUI
//!   quirl styles                    List available dot styles

use std::env;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::DynamicImage;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use ratatui_image::{
    StatefulImage,
    picker::{Picker, ProtocolType},
    protocol::StatefulProtocol,
};

use quirl::{DotStyle, Mask, MaskOptions, circle_padding, draw_shapes, expand_to_circle};

mod cli;

use cli::common::{pixmap_to_image, render_pixmap};
use cli::config::RenderConfig;
use cli::document::svg_document;
use cli::encode::{encode_payload, parse_ec_level};
use cli::render::cmd_render;

// Preview raster size; square because QR codes are.
const IMAGE_SIZE: u32 = 1600;

/// Render one preview frame to an image for terminal display.
fn render_preview(data: &str, style: DotStyle, circle: bool) -> Result<DynamicImage, String> {
    let config = RenderConfig {
        data: Some(data.to_string()),
        style: style.name().to_string(),
        circle,
        ..RenderConfig::default()
    };

    let ec_level = parse_ec_level(&config.ec_level)?;
    let symbol = encode_payload(data, ec_level)?;
    let options = MaskOptions {
        reserve_finders: true,
        logo: None,
    };
    let mask = Mask::from_symbol(&symbol, &options).map_err(|e| e.to_string())?;

    let symbol_modules = mask.rows();
    let (mask, padding) = if circle {
        let padding = circle_padding(symbol_modules);
        (expand_to_circle(&mask, padding), padding)
    } else {
        (mask, 0)
    };

    let shapes = draw_shapes(&mask, style, config.module_size);
    let svg = svg_document(&config, style, &mask, &shapes, symbol_modules, padding);

    let pixmap = render_pixmap(&svg, IMAGE_SIZE, IMAGE_SIZE)?;
    pixmap_to_image(pixmap)
}

/// Application state for the preview TUI.
struct App {
    /// Payload being rendered
    data: String,
    /// All selectable styles
    styles: Vec<DotStyle>,
    /// Current style selection
    style_state: ListState,
    /// Circular canvas toggle
    circle: bool,
    /// Last render time
    render_ms: f64,
    /// Should exit
    should_quit: bool,
    /// Image picker for terminal protocol detection
    picker: Picker,
    /// Current rendered image protocol state
    image_state: Option<Box<dyn StatefulProtocol>>,
    /// Flag to indicate image needs re-rendering
    needs_image_update: bool,
    /// Last render error, shown in the status line
    error: Option<String>,
}

impl App {
    fn new(data: String) -> Self {
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;

        let mut style_state = ListState::default();
        style_state.select(Some(0));

        Self {
            data,
            styles: DotStyle::all().to_vec(),
            style_state,
            circle: false,
            render_ms: 0.0,
            should_quit: false,
            picker,
            image_state: None,
            needs_image_update: true,
            error: None,
        }
    }

    fn selected_style(&self) -> DotStyle {
        self.styles[self.style_state.selected().unwrap_or(0)]
    }

    fn select_offset(&mut self, offset: isize) {
        let len = self.styles.len() as isize;
        let current = self.style_state.selected().unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        self.style_state.select(Some(next));
        self.needs_image_update = true;
    }

    fn update_image(&mut self) {
        let started = Instant::now();
        match render_preview(&self.data, self.selected_style(), self.circle) {
            Ok(image) => {
                self.image_state = Some(self.picker.new_resize_protocol(image));
                self.error = None;
            }
            Err(e) => {
                self.image_state = None;
                self.error = Some(e);
            }
        }
        self.render_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.needs_image_update = false;
    }
}

fn run_preview(data: String) -> Result<(), String> {
    enable_raw_mode().map_err(|e| e.to_string())?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| e.to_string())?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).map_err(|e| e.to_string())?;

    let mut app = App::new(data);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().map_err(|e| e.to_string())?;
    stdout()
        .execute(LeaveAlternateScreen)
        .map_err(|e| e.to_string())?;
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        if app.needs_image_update {
            app.update_image();
        }

        terminal.draw(|frame| ui(frame, app)).map_err(|e| e.to_string())?;

        if event::poll(Duration::from_millis(50)).map_err(|e| e.to_string())? {
            if let Event::Key(key) = event::read().map_err(|e| e.to_string())? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    KeyCode::Up | KeyCode::Left => app.select_offset(-1),
                    KeyCode::Down | KeyCode::Right => app.select_offset(1),
                    KeyCode::Char('c') => {
                        app.circle = !app.circle;
                        app.needs_image_update = true;
                    }
                    KeyCode::Char('r') => app.needs_image_update = true,
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(0)])
        .split(frame.area());

    let sidebar = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(chunks[0]);

    let items: Vec<ListItem> = app
        .styles
        .iter()
        .map(|style| ListItem::new(style.name()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" styles "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, sidebar[0], &mut app.style_state);

    let status = match &app.error {
        Some(error) => format!("error: {}", error),
        None => format!(
            "shape: {}\nrender: {:.1} ms",
            if app.circle { "circle" } else { "square" },
            app.render_ms
        ),
    };
    let help = Paragraph::new(format!(
        "{}\n\n\u{2191}/\u{2193} style\nc circle\nq quit",
        status
    ))
    .block(Block::default().borders(Borders::ALL).title(" quirl "));
    frame.render_widget(help, sidebar[1]);

    let image_block = Block::default().borders(Borders::ALL).title(" preview ");
    let inner = image_block.inner(chunks[1]);
    frame.render_widget(image_block, chunks[1]);
    if let Some(state) = app.image_state.as_mut() {
        frame.render_stateful_widget(StatefulImage::new(None), inner, state);
    }
}

fn cmd_styles() {
    println!("Available dot styles:");
    println!("  square          sharp corners everywhere");
    println!("  dots            one circle per module, no merging");
    println!("  rounded         quarter-circle corners, half-module radius");
    println!("  extra-rounded   quarter-circle corners, full-module radius");
    println!("  classy          rounds only the top-left/bottom-right corners");
    println!("  classy-rounded  classy with full-module radius");
}

fn print_usage(prog: &str) {
    eprintln!("quirl - stylized QR rendering");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} render <text> [options]", prog);
    eprintln!("  {} preview [text]", prog);
    eprintln!("  {} styles", prog);
    eprintln!();
    eprintln!("Render options:");
    eprintln!("  -s, --style <name>       Dot style (default: square)");
    eprintln!("  -m, --module-size <n>    Module size in user units (default: 10)");
    eprintln!("  --margin <n>             Quiet-zone margin (default: 40)");
    eprintln!("  -e, --ec-level <L|M|Q|H> Error correction (default: M)");
    eprintln!("  -o, --output <file>      Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>       Output format: svg, png, json (default: svg)");
    eprintln!("  --circle                 Expand to a circular canvas");
    eprintln!("  --fg <color>             Foreground color (default: #000000)");
    eprintln!("  --bg <color>             Background color (default: #ffffff)");
    eprintln!("  --no-background          Transparent background");
    eprintln!("  --gradient <from:to[:deg]>  Two-stop linear gradient fill");
    eprintln!("  -c, --config <file>      YAML/JSON config; flags override it");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "render" => {
                cmd_render(&args[2..]);
                return;
            }
            "styles" => {
                cmd_styles();
                return;
            }
            "preview" => {
                let data = args
                    .get(2)
                    .cloned()
                    .unwrap_or_else(|| "HELLO QUIRL".to_string());
                if let Err(e) = run_preview(data) {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            _ => {}
        }
    }

    print_usage(args.first().map(String::as_str).unwrap_or("quirl"));
    std::process::exit(1);
}
