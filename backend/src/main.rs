mod app;
mod env;
mod error;
mod handle;
mod poststore;
mod redis_pool;
mod signals;
mod tokens;
mod tracker;
mod utils;
mod viewed_cookie;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::App,
    poststore::{DynamoPostsDB, InMemoryPostsDB, PostStore},
    tokens::{InMemoryTokens, RedisTokens, TokenStore},
    tracker::{SystemClock, ViewTracker},
};

fn setup_cors() -> CorsLayer {
    if env::relax_cors() {
        tracing::info!("cors setup: permissive");
        CorsLayer::very_permissive()
    } else {
        CorsLayer::new()
    }
}

async fn dynamo_client() -> aws_sdk_dynamodb::Client {
    let region_provider = RegionProviderChain::default_provider().or_else("us-west-1");
    let mut config = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

    if env::local_db() {
        config = config
            .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
                "aid", "sid", None, None, "local",
            ))
            .endpoint_url(env::db_url());
    }

    aws_sdk_dynamodb::Client::new(&config.load().await)
}

async fn create_post_store() -> Result<Arc<dyn PostStore>> {
    if env::use_dynamo() {
        let client = dynamo_client().await;
        Ok(Arc::new(DynamoPostsDB::new(client, true).await?))
    } else {
        tracing::info!("using in-memory post store");
        Ok(Arc::new(InMemoryPostsDB::default()))
    }
}

async fn create_token_store() -> Result<Arc<dyn TokenStore>> {
    match env::redis_url() {
        Some(url) => {
            let pool = redis_pool::create_pool(&url)?;
            redis_pool::ping_test_redis(&pool).await?;

            Ok(Arc::new(RedisTokens::new(pool)))
        }
        None => {
            tracing::info!("using in-memory token store");
            Ok(Arc::new(InMemoryTokens::default()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "blog_server=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let posts = create_post_store().await?;
    let tokens = create_token_store().await?;

    let tracker = ViewTracker::new(Arc::clone(&posts), tokens, Arc::new(SystemClock));
    let app = App::new(posts, tracker);

    let router = handle::api_routes(app)
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors());

    let (shutdown_sender, shutdown_receiver) = tokio::sync::oneshot::channel();
    signals::create_term_signal_handler(shutdown_sender);

    let addr = SocketAddr::from(([0, 0, 0, 0], env::port()));

    tracing::info!("listening on {addr}");

    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .with_graceful_shutdown(async {
            shutdown_receiver.await.ok();
        })
        .await?;

    Ok(())
}
