use anyhow::Context;
use clap::{ArgAction, Parser};
use fragbox::{
    BoxNode, BoxReader, BoxType, ReaderConfig, TracingLogger,
    util::{hex_dump, preview},
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Fragmented MP4 box explorer with mdat text extraction")]
struct Args {
    /// Fragmented MP4 file path
    path: PathBuf,

    /// Only print subtree(s) matching a dotted path (e.g. moof.traf[0].trun)
    #[arg(long = "filter")]
    filter: Option<String>,

    /// Dump raw body of every box of this type (e.g. --raw trun)
    #[arg(long = "raw")]
    raw: Option<String>,

    /// Limit nesting depth accepted by the parser
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the decoded text of the last mdat box
    #[arg(long, action = ArgAction::SetTrue)]
    payload: bool,

    /// Show bytes count when dumping raw (0 means entire box body)
    #[arg(long, default_value_t = 0)]
    bytes: usize,

    /// Emit JSON instead of human-readable tree
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Log every box as it is found
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Reader settings as JSON (e.g. {"max_depth": 8, "max_input_len": 1048576})
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    boxes: Vec<&'a BoxNode>,
    payload_text: Option<&'a str>,
    warnings: &'a [fragbox::ParseWarning],
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        let level = if args.verbose { "trace" } else { "warn" };
        format!("fragbox={level}")
    });
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(p) => {
            let s = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            ReaderConfig::from_json(&s).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => ReaderConfig::default(),
    };
    if let Some(d) = args.max_depth {
        config.max_depth = d;
    }
    // Warnings always reach the subscriber; box events are filtered by level.
    config.log = true;

    let data = std::fs::read(&args.path).with_context(|| format!("reading {}", args.path.display()))?;

    let mut reader = BoxReader::load(&data).with_config(config).with_logger(TracingLogger);
    if let Err(e) = reader.parse() {
        tracing::debug!(error = %e, "parse failed");
        eprintln!("{}: this input does not contain a recognizable box structure", args.path.display());
        std::process::exit(1);
    }
    let report = reader.report();

    let targets: Vec<&BoxNode> = match &args.filter {
        Some(path) => select_by_path(report.boxes, path),
        None => report.boxes.iter().collect(),
    };

    if args.json {
        let out = JsonOutput {
            boxes: targets,
            payload_text: report.payload_text,
            warnings: report.warnings,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for b in &targets {
        print_box(b);
    }

    if args.payload {
        match report.payload_text {
            Some(text) => println!("\n== mdat payload ({} bytes) ==\n{}", text.len(), text),
            None => println!("\n== no mdat payload =="),
        }
    }

    if let Some(sel) = &args.raw {
        let typ = type_from_name(sel).with_context(|| format!("unknown box type {sel:?}"))?;
        dump_raw(&data, report.boxes, typ, args.bytes);
    }

    Ok(())
}

// ---------- Human-readable tree ----------

fn print_box(root: &BoxNode) {
    for (depth, b) in root.walk() {
        let indent = "  ".repeat(depth);
        let mut line = format!(
            "{indent}{:>6} {:>10} {}",
            format!("{:#x}", b.start),
            b.size,
            b.typ
        );
        if b.typ.is_container() {
            line.push_str(" (container)");
        }
        if let Some(ext) = &b.extended_type {
            line.push_str(&format!(" [{ext}]"));
        }
        println!("{line}");
        if let Some(text) = &b.payload {
            println!("{indent}        -> {}", preview(text.trim(), 60));
        }
    }
}

// ---------- Raw dump ----------

fn dump_raw(data: &[u8], boxes: &[BoxNode], typ: BoxType, limit: usize) {
    let matches = boxes
        .iter()
        .flat_map(|r| r.walk())
        .map(|(_, b)| b)
        .filter(|b| b.typ == typ);

    for (i, b) in matches.enumerate() {
        let len = b.data_len();
        let to_read = if limit == 0 || limit > len { len } else { limit };
        let off = b.data_start();
        println!(
            "\n== Dump {} ({}) body: offset={:#x}, len={} ==",
            i, b.typ, off, to_read
        );
        print!("{}", hex_dump(&data[off..off + to_read], off));
    }
}

// ---------- Filter path: moof.traf[0].trun ----------

fn select_by_path<'a>(roots: &'a [BoxNode], path: &str) -> Vec<&'a BoxNode> {
    let mut current: Vec<&'a BoxNode> = Vec::new();

    for (depth, seg) in path.split('.').enumerate() {
        let (name, idx) = parse_segment(seg);
        let typ = match type_from_name(name) {
            Some(t) => t,
            None => return Vec::new(),
        };

        let candidates: Vec<&'a BoxNode> = if depth == 0 {
            roots.iter().collect()
        } else {
            current.iter().flat_map(|&b| b.children.iter()).collect()
        };
        let matches: Vec<&'a BoxNode> = candidates.into_iter().filter(|b| b.typ == typ).collect();

        current = match idx {
            Some(i) => matches.get(i).copied().into_iter().collect(),
            None => matches,
        };
        if current.is_empty() {
            break;
        }
    }

    current
}

fn type_from_name(name: &str) -> Option<BoxType> {
    fragbox::FourCC::from_str(name).and_then(|cc| BoxType::from_tag(cc.0))
}

fn parse_segment(seg: &str) -> (&str, Option<usize>) {
    if let Some(l) = seg.find('[') {
        let name = &seg[..l];
        if let Some(r) = seg[l + 1..].find(']') {
            let idx_str = &seg[l + 1..l + 1 + r];
            let idx = idx_str.parse::<usize>().ok();
            return (name, idx);
        }
        (name, None)
    } else {
        (seg, None)
    }
}
