mod llm;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize LLM client (non-fatal: generation falls back to built-in scripts).
    let llm = match llm::client_from_env() {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — serving fallback scripts");
            None
        }
    };

    let state = state::AppState::new(llm, state::DemoConfig::from_env());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "terrascope listening");
    axum::serve(listener, app).await.expect("server failed");
}
