use std::{process, sync::Arc};

use sentiero::{
    application::{
        error::AppError,
        repos::{ContentRepo, SettingsRepo, TermsRepo},
        sitemap::SitemapService,
    },
    cache::DocumentStore,
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{InternalState, PublicState, build_internal_router, build_public_router},
        telemetry,
    },
};
use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        Some(config::Command::Serve(_)) | None => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;

    let cache = Arc::new(DocumentStore::new(&settings.cache));

    let content_repo: Arc<dyn ContentRepo> = repositories.clone();
    let terms_repo: Arc<dyn TermsRepo> = repositories.clone();
    let settings_repo: Arc<dyn SettingsRepo> = repositories.clone();

    let sitemap_service = Arc::new(SitemapService::new(
        content_repo,
        terms_repo,
        settings_repo,
        cache.clone(),
        settings.cache.clone(),
    ));

    let public_state = PublicState {
        sitemaps: sitemap_service,
    };
    let internal_state = InternalState {
        db: repositories,
        cache,
    };

    serve_http(&settings, public_state, internal_state).await
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool =
        PostgresRepositories::connect(database_url, settings.database.max_connections.get())
            .await
            .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

async fn serve_http(
    settings: &config::Settings,
    public_state: PublicState,
    internal_state: InternalState,
) -> Result<(), AppError> {
    let public_router = build_public_router(public_state);
    let internal_router = build_internal_router(internal_state);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let internal_listener = tokio::net::TcpListener::bind(settings.server.internal_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "sentiero::serve",
        public = %settings.server.public_addr,
        internal = %settings.server.internal_addr,
        "listening"
    );

    let public_server = axum::serve(public_listener, public_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal());
    let internal_server = axum::serve(internal_listener, internal_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal());

    try_join!(public_server, internal_server)
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "sentiero::serve", error = %err, "failed to listen for shutdown signal");
    }
}
