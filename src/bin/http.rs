#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use capacity_tool::{CapacityDataset, http_api};

    let addr: SocketAddr = std::env::var("CAPACITY_TOOL_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    println!("capacity-tool HTTP API listening on http://{addr}");
    let dataset = CapacityDataset::new();
    http_api::serve(addr, dataset).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
