//! CLI client for the `quaytwind` daemon.
//!
//! Examples:
//!   quaytwin-cli scenarios
//!   quaytwin-cli status
//!   quaytwin-cli select productivo
//!   quaytwin-cli optimize on
//!   quaytwin-cli watch 100 productivo
//!   quaytwin-cli svg frame.svg
//!   quaytwin-cli render energetico 45 --ai out.svg
//!
//! By default it talks to 127.0.0.1:9877; override with `--addr host:port`.
//! `render` works offline and never contacts the daemon.
//!
//! Each invocation is its own session. `select` and `optimize` print the view
//! they produce; `watch [frames] [scenario] [--ai]` streams one session.

use quaytwin::dashboard::DashboardView;
use quaytwin::protocol::{Request, Response, DEFAULT_ADDR};
use quaytwin::scenario::{Benchmark, Scenario};
use quaytwin::scene::render_frame;
use quaytwin::session::SessionState;
use quaytwin::svg::{scene_to_svg, DEFAULT_HEIGHT_PX, DEFAULT_WIDTH_PX};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::process;
use std::time::Duration;

fn usage() -> ! {
    eprintln!("quaytwin-cli [--addr host:port] <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  scenarios                   List the scenario catalog");
    eprintln!("  status                      Show the current view (KPIs, frame)");
    eprintln!("  select <scenario>           baseline|productivo|energetico|ambiental");
    eprintln!("  optimize <on|off>           Toggle the AI-optimized override");
    eprintln!("  watch [frames] [scenario] [--ai]");
    eprintln!("                              Stream frames (default 20)");
    eprintln!("  svg [out.svg]               Fetch the current frame as SVG");
    eprintln!("  shutdown                    Stop the daemon");
    eprintln!("  render <scenario> <frame> [--ai] [out.svg]");
    eprintln!("                              Render one frame offline");
    process::exit(1);
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    let mut addr = DEFAULT_ADDR.to_string();
    if args.len() >= 2 && args[0] == "--addr" {
        addr = args[1].clone();
        args.drain(0..2);
    }

    if args.is_empty() {
        usage();
    }
    (addr, args)
}

struct Connection {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl Connection {
    fn open(addr: &str) -> Result<Self, String> {
        let stream = TcpStream::connect(addr).map_err(|e| format!("connect: {e}"))?;
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .map_err(|e| format!("set_read_timeout: {e}"))?;
        let reader = BufReader::new(stream.try_clone().map_err(|e| format!("clone: {e}"))?);
        Ok(Self { stream, reader })
    }

    fn send(&mut self, req: &Request) -> Result<(), String> {
        let line = serde_json::to_string(req).map_err(|e| format!("serialize: {e}"))?;
        self.stream
            .write_all(line.as_bytes())
            .and_then(|_| self.stream.write_all(b"\n"))
            .map_err(|e| format!("send: {e}"))
    }

    fn recv(&mut self) -> Result<Response, String> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .map_err(|e| format!("recv: {e}"))?;
        if n == 0 {
            return Err("recv: daemon closed the connection".to_string());
        }
        serde_json::from_str(&line).map_err(|e| format!("parse response: {e}"))
    }

    /// Send and wait for the first non-`Frame` reply.
    fn request(&mut self, req: &Request) -> Result<Response, String> {
        self.send(req)?;
        loop {
            match self.recv()? {
                Response::Frame(_) => continue,
                other => return Ok(other),
            }
        }
    }
}

fn print_view(v: &DashboardView) {
    println!(
        "scenario={} selected={} ai={} frame={}",
        v.scenario.key(),
        v.selector.selected.key(),
        v.selector.ai_active,
        v.frame
    );
    let kpis: Vec<String> = v
        .kpis
        .metrics
        .iter()
        .map(|m| format!("{}={}", m.label, m.display_value()))
        .collect();
    println!("kpi: {}", kpis.join("  "));
    if let Some(e) = &v.explanation {
        println!();
        println!("{}", e.heading);
        println!("{}", e.body);
    }
}

fn write_svg(svg: &str, out: Option<&String>) -> Result<(), String> {
    match out {
        Some(path) => std::fs::write(path, svg).map_err(|e| format!("write {path}: {e}")),
        None => {
            print!("{svg}");
            Ok(())
        }
    }
}

fn render_offline(args: &[String]) -> Result<(), String> {
    if args.len() < 3 {
        usage();
    }
    let scenario: Scenario = args[1].parse().map_err(|e| format!("{e}"))?;
    let frame: u64 = args[2]
        .parse()
        .map_err(|_| "frame must be a non-negative integer".to_string())?;

    let mut ai = false;
    let mut out = None;
    for a in &args[3..] {
        if a == "--ai" {
            ai = true;
        } else {
            out = Some(a);
        }
    }

    let mut state = SessionState::new();
    if let Ok(b) = args[1].parse::<Benchmark>() {
        state.select_scenario(b);
    }
    state.set_ai_active(ai || scenario.is_optimized());

    let scene = render_frame(state.resolve_params(), frame);
    let svg = scene_to_svg(&scene, DEFAULT_WIDTH_PX, DEFAULT_HEIGHT_PX);
    write_svg(&svg, out)
}

fn expect_success(resp: Response) -> Result<(), String> {
    match resp {
        Response::Error { message } => Err(message),
        _ => Ok(()),
    }
}

fn watch(conn: &mut Connection, args: &[String]) -> Result<(), String> {
    let mut frames: u64 = 20;
    for a in args {
        if a == "--ai" {
            expect_success(conn.request(&Request::SetOptimize { enabled: true })?)?;
        } else if let Ok(n) = a.parse::<u64>() {
            frames = n;
        } else {
            let scenario: Benchmark = a.parse().map_err(|e| format!("{e}"))?;
            expect_success(conn.request(&Request::SelectScenario { scenario })?)?;
        }
    }

    expect_success(conn.request(&Request::Watch { enabled: true })?)?;

    let mut seen = 0;
    while seen < frames {
        if let Response::Frame(v) = conn.recv()? {
            let m = &v.kpis.metrics;
            println!(
                "frame={:<6} scenario={:<13} {}={} {}={} {}={}",
                v.frame,
                v.scenario.key(),
                m[0].label,
                m[0].display_value(),
                m[1].label,
                m[1].display_value(),
                m[2].label,
                m[2].display_value(),
            );
            seen += 1;
        }
    }
    Ok(())
}

fn run(addr: &str, args: &[String]) -> Result<(), String> {
    let cmd = args[0].as_str();

    match cmd {
        "render" => return render_offline(args),
        "watch" => {
            let mut conn = Connection::open(addr)?;
            return watch(&mut conn, &args[1..]);
        }
        _ => {}
    }

    let req = match cmd {
        "scenarios" => Request::ListScenarios,
        "status" => Request::GetView,
        "select" => {
            if args.len() < 2 {
                usage();
            }
            let scenario: Benchmark = args[1].parse().map_err(|e| format!("{e}"))?;
            Request::SelectScenario { scenario }
        }
        "optimize" => {
            if args.len() < 2 {
                usage();
            }
            let enabled =
                parse_bool(&args[1]).ok_or_else(|| "optimize must be on|off".to_string())?;
            Request::SetOptimize { enabled }
        }
        "svg" => Request::GetSvg {
            width: None,
            height: None,
        },
        "shutdown" => Request::Shutdown,
        _ => usage(),
    };

    let mut conn = Connection::open(addr)?;
    let resp = conn.request(&req)?;

    // The session ends with this connection, so show what the change produced.
    if matches!(cmd, "select" | "optimize") {
        expect_success(resp)?;
        return match conn.request(&Request::GetView)? {
            Response::View(v) => {
                print_view(&v);
                Ok(())
            }
            Response::Error { message } => Err(message),
            _ => Err("unexpected response to GetView".to_string()),
        };
    }

    match resp {
        Response::Scenarios { entries } => {
            for e in entries {
                println!(
                    "{:<14} {:<14} selectable={:<5} gmph={} energy={} co2={} speed={} smoke={} bubbles={}",
                    e.scenario.key(),
                    e.label,
                    e.selectable,
                    e.params.throughput_gmph,
                    e.params.energy_gwh_per_year,
                    e.params.co2_tons_per_year,
                    e.params.animation_speed,
                    e.params.smoke_count,
                    e.params.co2_bubble_count,
                );
            }
        }
        Response::View(v) | Response::Frame(v) => print_view(&v),
        Response::Svg { svg, .. } => write_svg(&svg, args.get(1))?,
        Response::Success { message } => println!("{message}"),
        Response::Error { message } => return Err(message),
    }
    Ok(())
}

fn main() {
    let (addr, args) = parse_args();
    if let Err(e) = run(&addr, &args) {
        eprintln!("{e}");
        process::exit(1);
    }
}
