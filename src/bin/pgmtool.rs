//! Small batch tool: apply one operation to a PGM file.
//!
//! ```text
//! pgmtool <input.pgm> <output.pgm> <op> [args] [--report <counters.json>]
//! ```

use std::env;
use std::path::PathBuf;
use std::rc::Rc;

use graymap::image::instrument::write_json_file;
use graymap::{AccessCounters, Image};

const USAGE: &str = "usage: pgmtool <input.pgm> <output.pgm> <op> [args] [--report <file.json>]
ops:
  negative
  threshold <level>
  brighten <factor>
  rotate
  mirror
  blur <dx> <dy>";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        eprintln!("{USAGE}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let report = take_report_path(&mut args)?;
    if args.len() < 3 {
        return Err("expected <input> <output> <op>".into());
    }
    let input = PathBuf::from(&args[0]);
    let output = PathBuf::from(&args[1]);
    let op = args[2].as_str();
    let op_args = &args[3..];

    let counters = Rc::new(AccessCounters::new());
    let mut img = Image::load(&input).map_err(|e| e.to_string())?;
    img.set_observer(counters.clone());

    let result = match op {
        "negative" => {
            img.negative();
            img
        }
        "threshold" => {
            let thr: u8 = parse_arg(op_args, 0, "threshold level")?;
            img.threshold(thr);
            img
        }
        "brighten" => {
            let factor: f64 = parse_arg(op_args, 0, "brighten factor")?;
            if factor < 0.0 {
                return Err("brighten factor must be non-negative".into());
            }
            img.brighten(factor);
            img
        }
        "rotate" => img.rotate_ccw90(),
        "mirror" => img.mirror_horizontal(),
        "blur" => {
            let dx: usize = parse_arg(op_args, 0, "blur dx")?;
            let dy: usize = parse_arg(op_args, 1, "blur dy")?;
            img.blur(dx, dy);
            img
        }
        other => return Err(format!("unknown operation '{other}'")),
    };

    result.save(&output).map_err(|e| e.to_string())?;

    let (min, max) = result.stats();
    println!(
        "{} -> {}: {}x{} maxval={} min={min} max={max}",
        input.display(),
        output.display(),
        result.width(),
        result.height(),
        result.maxval()
    );

    if let Some(path) = report {
        write_json_file(&path, &counters.report()).map_err(|e| e.to_string())?;
        println!("pixel-access report written to {}", path.display());
    }
    Ok(())
}

fn take_report_path(args: &mut Vec<String>) -> Result<Option<PathBuf>, String> {
    let Some(pos) = args.iter().position(|a| a == "--report") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        return Err("--report requires a file path".into());
    }
    let path = PathBuf::from(args.remove(pos + 1));
    args.remove(pos);
    Ok(Some(path))
}

fn parse_arg<T: std::str::FromStr>(args: &[String], i: usize, what: &str) -> Result<T, String> {
    let raw = args.get(i).ok_or_else(|| format!("missing {what}"))?;
    raw.parse().map_err(|_| format!("invalid {what}: '{raw}'"))
}
