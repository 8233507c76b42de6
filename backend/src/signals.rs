use tokio::sync::oneshot;

pub fn create_term_signal_handler(sender: oneshot::Sender<()>) {
    tokio::spawn(async move {
        wait_for_term().await;

        let _: Result<(), _> = sender.send(());
    });
}

#[cfg(target_os = "linux")]
async fn wait_for_term() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            tracing::info!("register terminate signal handler");

            stream.recv().await;

            tracing::info!("got terminate signal");
        }
        Err(e) => {
            tracing::error!("signal error: {e}");

            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(target_os = "linux"))]
async fn wait_for_term() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("signal error: {e}");

        std::future::pending::<()>().await;
    }
}
