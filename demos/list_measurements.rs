use ripe_atlas::{Client, Config, Params};

/// Filters for one run, in place of global flags.
#[derive(Debug, Default)]
struct ListOptions {
    country: Option<String>,
    asn: Option<String>,
    kind: Option<String>,
    verbose: bool,
}

impl ListOptions {
    fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let mut opts = ListOptions {
            country: Some("fr".to_string()),
            ..Default::default()
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--country" => opts.country = args.next(),
                "--asn" => opts.asn = args.next(),
                "--type" => opts.kind = args.next(),
                "-v" | "--verbose" => opts.verbose = true,
                _ => {}
            }
        }
        opts
    }

    fn params(&self) -> Params {
        let mut params = Params::new();
        let filters = [
            ("country_code", &self.country),
            ("asn", &self.asn),
            ("type", &self.kind),
        ];
        for (name, value) in filters {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                params.insert(name.to_string(), value.clone());
            }
        }
        params
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let opts = ListOptions::from_args(std::env::args().skip(1));

    let mut config = Config::default().with_verbose(opts.verbose);
    if let Ok(key) = std::env::var("ATLAS_API_KEY") {
        config = config.with_api_key(key);
    }
    let client = Client::new(vec![config])?;

    let params = opts.params();
    let measurements = client.measurements(&params).await?;

    tracing::info!("Got {} measurements with {:?}", measurements.len(), params);
    for m in &measurements {
        if opts.verbose {
            println!("{:?}", m);
        } else {
            println!(
                "ID: {} type: {} description: {}",
                m.id,
                m.kind,
                m.description.as_deref().unwrap_or_default()
            );
        }
    }

    Ok(())
}
