use arc_dial::{Dial, DialCommand, DialConfig};
use log::{info, warn};
use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Parse --title, --step and --start from the command line
    let mut window_title = "Arc Dial".to_string();
    let mut sweep_step = 0.01; // radians per frame
    let mut start_degrees = 0.0;
    let mut args = env::args().peekable();
    while let Some(arg) = args.next() {
        if arg == "--title" {
            if let Some(title) = args.next() {
                window_title = title;
            }
        } else if arg == "--step" {
            if let Some(step) = args.next() {
                if let Ok(step) = step.parse::<f64>() {
                    sweep_step = step.abs();
                }
            }
        } else if arg == "--start" {
            if let Some(start) = args.next() {
                if let Ok(start) = start.parse::<f64>() {
                    start_degrees = start.clamp(0.0, 180.0);
                }
            }
        }
    }

    info!(
        "starting dial: step={} rad/frame, start={} deg",
        sweep_step, start_degrees
    );

    let config = DialConfig::builder()
        .title(window_title)
        .sweep_step(sweep_step)
        .start_angle(start_degrees.to_radians())
        .build();
    let mut dial = Dial::new(config);

    // Numbers piped on stdin (degrees along the arc) steer the graduation;
    // without input the dial keeps sweeping on its own.
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match line.trim().parse::<f64>() {
                Ok(degrees) => {
                    let angle = degrees.clamp(0.0, 180.0).to_radians();
                    if sender.send(DialCommand::SetAngle(angle)).is_err() {
                        break;
                    }
                }
                Err(_) => warn!("ignoring non-numeric input: {:?}", line.trim()),
            }
        }
    });

    dial.show_with_commands(receiver)
}
