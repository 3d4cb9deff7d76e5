use arc_dial::{Dial, DialCommand, DialConfig, LabelFormatter};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn percent_label(angle: f64) -> String {
    format!("{:.0}%", angle / std::f64::consts::PI * 100.0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Customize the dial with the bon-generated builder
    let config = DialConfig::builder()
        .title("Sweep Demo".to_string())
        .graduation_length(35.0)
        .sweep_step(0.02)
        .label_fn(percent_label as LabelFormatter)
        .build();

    let mut dial = Dial::new(config);

    // Create a channel for steering the graduation
    let (sender, receiver) = mpsc::channel();

    // Spawn a thread that parks the graduation at a few fixed positions,
    // then hands control back to the autonomous sweep
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(3));
        for degrees in [30.0_f64, 90.0, 150.0, 45.0] {
            if sender
                .send(DialCommand::SetAngle(degrees.to_radians()))
                .is_err()
            {
                return;
            }
            thread::sleep(Duration::from_secs(2));
        }
        let _ = sender.send(DialCommand::SetSweepStep(0.005));
        let _ = sender.send(DialCommand::Resume);
    });

    println!("Displaying the dial:");
    println!("- sweeps on its own for 3 seconds");
    println!("- then parks at 30, 90, 150 and 45 degrees");
    println!("- then resumes a slower sweep");
    println!("Press Ctrl+C to exit");

    dial.show_with_commands(receiver)
}
