use ripe_atlas::{Client, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let id: u64 = std::env::args()
        .nth(1)
        .ok_or("you must specify a measurement ID")?
        .parse()?;

    let mut config = Config::default();
    if let Ok(key) = std::env::var("ATLAS_API_KEY") {
        config = config.with_api_key(key);
    }
    let client = Client::new(vec![config])?;

    let measurement = client.measurement(id).await?;
    if measurement.kind != "sslcert" {
        return Err(format!("measurement {} is a {} measurement", id, measurement.kind).into());
    }

    for result in client.tls_certificates(id).await? {
        println!(
            "probe {} -> {}:{} ({} certificates)",
            result.prb_id,
            result.dst_name.as_deref().unwrap_or("?"),
            result.dst_port.unwrap_or(443),
            result.cert.len()
        );
        if let Some(leaf) = result.cert.first() {
            println!("{}", leaf);
        }
    }

    Ok(())
}
