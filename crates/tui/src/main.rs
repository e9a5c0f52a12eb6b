mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use timeline_cat_core::{ConstantColorMap, SimpleColorMap, TimelineConfig, plot_events_with};
use timeline_cat_protocol::{Color, Palette};

const USAGE: &str = "Usage: timeline-cat [EVENTS.json] [--svg OUT.svg] [--palette ggplot|tab10] [--text-color COLOR] [-v]";

#[derive(Debug, PartialEq)]
struct Args {
    input: Option<PathBuf>,
    svg: Option<PathBuf>,
    palette: String,
    text_color: Color,
    verbose: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        input: None,
        svg: None,
        palette: "ggplot".to_string(),
        text_color: Color::BLACK,
        verbose: false,
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--svg" => {
                let path = args.next().context("--svg needs a path")?;
                parsed.svg = Some(PathBuf::from(path));
            }
            "--palette" => {
                parsed.palette = args.next().context("--palette needs a name")?;
            }
            "--text-color" => {
                let value = args.next().context("--text-color needs a color")?;
                parsed.text_color = value.parse()?;
            }
            "-v" | "--verbose" => parsed.verbose = true,
            flag if flag.starts_with('-') => bail!("unknown option {flag}\n{USAGE}"),
            path => {
                if parsed.input.is_some() {
                    bail!("more than one input file\n{USAGE}");
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let palette = Palette::by_name(&args.palette)
        .with_context(|| format!("unknown palette {:?}", args.palette))?;

    let (config, events, title) = match &args.input {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let input = timeline_cat_core::input::parse_events(&data)
                .with_context(|| format!("parsing {}", path.display()))?;
            (input.config, input.events, path.display().to_string())
        }
        None => (
            TimelineConfig::default(),
            timeline_cat_core::demo::demo_events()?,
            "demo".to_string(),
        ),
    };
    log::info!("{}: {} events", title, events.len());

    let figure = plot_events_with(
        &events,
        config,
        SimpleColorMap::for_palette(&palette),
        ConstantColorMap(args.text_color),
    )?;

    match &args.svg {
        Some(out) => {
            std::fs::write(out, figure.to_svg(&palette))
                .with_context(|| format!("writing {}", out.display()))?;
            log::info!("wrote {}", out.display());
        }
        None => renderer::render_tui(&figure, &palette, &title)?,
    }
    Ok(())
}
