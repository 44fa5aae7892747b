use arkade_vault::core::system::System;

#[tokio::main]
async fn main() {
    let mut system = match System::new().await {
        Ok(system) => system,
        Err(err) => {
            eprintln!("Failed to start: {}", err);
            std::process::exit(1);
        }
    };
    system.run().await;
    system.terminate().await;
}
