use std::fs;
use std::path::PathBuf;

use streamgraph::api::{
    CsvFileSource, DataSource, HostPayload, Pointer, RenderContext, RenderOutcome,
    StreamGraphConfig, StreamGraphPipeline,
};
use streamgraph::core::Viewport;
use streamgraph::render::SvgRenderer;
use streamgraph::telemetry;

const DEFAULT_OUTPUT_PATH: &str = "stream-graph.svg";
const EXIT_RENDER_FAILED: i32 = 2;

struct CliArgs {
    input: Option<PathBuf>,
    csv: Vec<PathBuf>,
    output: PathBuf,
    config: Option<PathBuf>,
    container: Option<Viewport>,
    hover_x: Option<f64>,
    hover_y: Option<f64>,
}

fn main() {
    let _ = telemetry::init_default_tracing("info");
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_RENDER_FAILED),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the chart failed and the error panel was written instead.
fn run() -> Result<bool, String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => StreamGraphConfig::load(path)
            .map_err(|err| format!("failed to load config `{}`: {err}", path.display()))?,
        None => StreamGraphConfig::default(),
    };

    let mut context = RenderContext::default();
    if let Some(container) = args.container {
        context = context.with_container(container);
    }
    if let Some(x) = args.hover_x {
        let pointer = args.hover_y.map_or(Pointer::at_x(x), |y| Pointer::at(x, y));
        context = context.with_pointer(pointer);
    }

    let mut pipeline = StreamGraphPipeline::from_config(SvgRenderer::new(), &config);
    let outcome = match &args.input {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            let payload: HostPayload =
                serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
            pipeline.render_host(&payload, &context)
        }
        None => {
            let paths = if args.csv.is_empty() {
                config.standalone.sample_data_paths.clone()
            } else {
                args.csv.clone()
            };
            let sources: Vec<Box<dyn DataSource>> = paths
                .into_iter()
                .map(|path| Box::new(CsvFileSource::new(path)) as Box<dyn DataSource>)
                .collect();
            pipeline.render_standalone(&sources, &context)
        }
    };

    let (document, rendered) = match outcome {
        RenderOutcome::Rendered(element) => (format!("{}\n", element.element), true),
        RenderOutcome::Failed(panel) => {
            eprintln!("{}: {}", panel.title, panel.message);
            (panel.to_html(), false)
        }
    };
    fs::write(&args.output, document)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;
    println!("wrote {}", args.output.display());
    Ok(rendered)
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        input: None,
        csv: Vec::new(),
        output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        config: None,
        container: None,
        hover_x: None,
        hover_y: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match arg.as_str() {
            "--input" => parsed.input = Some(PathBuf::from(value("--input")?)),
            "--csv" => parsed.csv.push(PathBuf::from(value("--csv")?)),
            "--output" => parsed.output = PathBuf::from(value("--output")?),
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--container" => parsed.container = Some(parse_container(&value("--container")?)?),
            "--hover-x" => parsed.hover_x = Some(parse_pixel("--hover-x", &value("--hover-x")?)?),
            "--hover-y" => parsed.hover_y = Some(parse_pixel("--hover-y", &value("--hover-y")?)?),
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin render_stream_graph -- [--input <payload.json> | --csv <path>...] [--output <file>] [--config <settings.json>] [--container <WxH>] [--hover-x <px>] [--hover-y <px>]"
                );
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    if parsed.input.is_some() && !parsed.csv.is_empty() {
        return Err("--input and --csv are mutually exclusive".to_owned());
    }
    Ok(parsed)
}

fn parse_container(raw: &str) -> Result<Viewport, String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid container `{raw}`, expected <W>x<H>"))?;
    let width = width
        .trim()
        .parse()
        .map_err(|err| format!("invalid container width `{width}`: {err}"))?;
    let height = height
        .trim()
        .parse()
        .map_err(|err| format!("invalid container height `{height}`: {err}"))?;
    Ok(Viewport::new(width, height))
}

fn parse_pixel(name: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("invalid value for {name}: `{raw}`"))
}
