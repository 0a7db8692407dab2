use ermine::render::{
    DiagramKind, ElasticLayoutOptions, HeadlessError, HeadlessOptions, SceneOptions,
    SpectralOptions,
};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Headless(HeadlessError),
    Options(String),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Headless(err) => write!(f, "{err}"),
            CliError::Options(msg) => write!(f, "invalid options file: {msg}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    variant: DiagramKind,
    focus: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    seed: Option<u64>,
    options: Option<String>,
    log_level: Option<String>,
    out: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Layout,
            input: None,
            pretty: false,
            variant: DiagramKind::Elastic,
            focus: None,
            width: None,
            height: None,
            seed: None,
            options: None,
            log_level: None,
            out: None,
        }
    }
}

/// `--options` file: every section and every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OptionsFile {
    elastic: ElasticLayoutOptions,
    spectral: SpectralOptions,
    scene: SceneOptions,
}

fn usage() -> &'static str {
    "ermine-cli\n\
\n\
USAGE:\n\
  ermine-cli [layout] [--pretty] [--variant elastic|navigable|spectral] [--focus <entity>] [--width <w>] [--height <h>] [--seed <n>] [--options <path>] [<path>|-]\n\
  ermine-cli render [--variant elastic|navigable|spectral] [--focus <entity>] [--width <w>] [--height <h>] [--seed <n>] [--options <path>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is EntityRelationshipData JSON: {\"entities\": {...}, \"relationships\": [...]}.\n\
  - layout prints the placed scene as JSON; render prints SVG to stdout unless --out is given.\n\
  - --focus only applies to the navigable variant.\n\
  - --options reads a JSON file with optional \"elastic\", \"spectral\" and \"scene\" sections.\n\
  - --log-level <filter> (or RUST_LOG) controls diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--variant" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.variant = v
                    .parse::<DiagramKind>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--focus" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.focus = Some(name.clone());
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = Some(parse_length(w)?);
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = Some(parse_length(h)?);
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--options" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options = Some(path.clone());
            }
            "--log-level" => {
                let Some(level) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.log_level = Some(level.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn parse_length(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CliError::Usage(usage()))
    }
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn headless_options(args: &Args) -> Result<HeadlessOptions, CliError> {
    let file = match args.options.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<OptionsFile>(&text)
                .map_err(|err| CliError::Options(err.to_string()))?
        }
        None => OptionsFile::default(),
    };

    let mut scene = file.scene;
    if let Some(w) = args.width {
        scene.width = w;
    }
    if let Some(h) = args.height {
        scene.height = h;
    }
    if let Some(seed) = args.seed {
        scene.seed = seed;
    }

    Ok(HeadlessOptions {
        variant: args.variant,
        focus: args.focus.clone(),
        scene,
        elastic: file.elastic,
        spectral: file.spectral,
    })
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    let _ = builder.try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let options = headless_options(&args)?;

    match args.command {
        Command::Layout => {
            let snapshot = ermine::render::layout_json_sync(&text, &options)?;
            let json = if args.pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            write_text(&json, args.out.as_deref())
        }
        Command::Render => {
            let svg = ermine::render::render_svg_sync(&text, &options)?;
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging(args.log_level.as_deref());

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
