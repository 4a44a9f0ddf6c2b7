//! Connect to a TV and print every readable setting.
//!
//! ```text
//! cargo run --example status -- /dev/ttyUSB0
//! cargo run --example status -- socket://192.168.178.42:10003
//! ```

use lgtv_serial::{ConnectOptions, LgTv};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let url = match std::env::args().nth(1) {
        Some(url) => url,
        None => {
            eprintln!("Must provide a serial url parameter like:");
            eprintln!("  COM3");
            eprintln!("  /dev/ttyUSB0");
            eprintln!("  socket://192.168.178.42:10003");
            std::process::exit(1);
        }
    };

    let tv = LgTv::connect(&url, ConnectOptions::default()).await?;

    println!("power:               {:?}", tv.get_power_on().await?);
    println!("input:               {:?}", tv.get_input().await?);
    println!("volume:              {:?}", tv.get_volume().await?);
    println!("mute:                {:?}", tv.get_mute().await?);
    println!("treble:              {:?}", tv.get_treble().await?);
    println!("bass:                {:?}", tv.get_bass().await?);
    println!("balance:             {:?}", tv.get_balance().await?);
    println!("brightness:          {:?}", tv.get_brightness().await?);
    println!("contrast:            {:?}", tv.get_contrast().await?);
    println!("color:               {:?}", tv.get_color().await?);
    println!("color temperature:   {:?}", tv.get_color_temperature().await?);
    println!("sharpness:           {:?}", tv.get_sharpness().await?);
    println!("remote control lock: {:?}", tv.get_remote_control_lock().await?);
    println!("energy saving:       {:?}", tv.get_energy_saving().await?);

    tv.close().await;
    Ok(())
}
