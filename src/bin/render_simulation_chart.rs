use epi_chart::telemetry::init_default_tracing;
use epi_chart::{ChartKind, ChartPayload, ChartStyle, render_chart_with_style};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: render_simulation_chart <reply.txt|-> [--type line|bar] [--style <style.json>] [--output <chart.png>] [--json]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    kind: ChartKind,
    style: Option<PathBuf>,
    output: PathBuf,
    print_payload: bool,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let reply = read_reply(&args.input)?;

    let style = match &args.style {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ChartStyle::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartStyle::default(),
    };

    let chart =
        render_chart_with_style(&reply, args.kind, &style).map_err(|err| err.to_string())?;
    fs::write(&args.output, &chart.png)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;

    if args.print_payload {
        let payload = ChartPayload::with_chart(reply, &chart);
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|err| format!("failed to serialize payload: {err}"))?;
        println!("{json}");
    } else {
        println!(
            "wrote {} ({}, {} series, {} bytes)",
            args.output.display(),
            chart.title,
            chart.series_labels.len(),
            chart.png.len()
        );
    }
    Ok(())
}

fn read_reply(input: &Path) -> Result<String, String> {
    if input.as_os_str() == "-" {
        let mut reply = String::new();
        std::io::stdin()
            .read_to_string(&mut reply)
            .map_err(|err| format!("failed to read stdin: {err}"))?;
        return Ok(reply);
    }
    fs::read_to_string(input).map_err(|err| format!("failed to read `{}`: {err}", input.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut kind = ChartKind::Line;
    let mut style = None::<PathBuf>;
    let mut output = PathBuf::from("chart.png");
    let mut print_payload = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--type" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --type".to_owned())?;
                kind = ChartKind::parse(&value);
            }
            "--style" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --style".to_owned())?;
                style = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = PathBuf::from(value);
            }
            "--json" => print_payload = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            flag if flag.starts_with("--") => return Err(format!("unknown argument `{flag}`")),
            path => {
                if input.replace(PathBuf::from(path)).is_some() {
                    return Err(format!("unexpected extra input `{path}`"));
                }
            }
        }
    }

    let input = input.ok_or_else(|| USAGE.to_owned())?;
    Ok(CliArgs {
        input,
        kind,
        style,
        output,
        print_payload,
    })
}
