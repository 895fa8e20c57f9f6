use crate::config::Config;
use crate::ort_service::OrtModelService;
use crate::server::HttpServer;
use crate::storage::StorageClient;
use crate::store::FirestoreStore;

use std::{error::Error, sync::Arc};
use tokio::{signal, sync::broadcast};

pub async fn start_app(config: Config) -> Result<(), Box<dyn Error>> {
    // The model must be in memory before the listener binds; any failure
    // here aborts startup.
    let storage = StorageClient::new(&config.model_storage);
    let artifact = match storage
        .download(&config.model_storage.bucket, &config.model_storage.model_object)
        .await
    {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to fetch model artifact: {:?}", e);
            return Err(Box::new(e));
        }
    };

    let model = match OrtModelService::from_bytes(&artifact) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            tracing::error!("Failed to load model: {:?}", e);
            return Err(Box::new(e));
        }
    };

    let store = Arc::new(FirestoreStore::new(&config.result_store));

    let server = HttpServer::new(model, store, &config.server).await?;

    let (shutdown_tx, _) = broadcast::channel(1);
    let server_shutdown_rx = shutdown_tx.subscribe();

    let server_handle = server.run(server_shutdown_rx).await?;

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown.");

    let _ = shutdown_tx.send(());
    let _ = server_handle.await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
