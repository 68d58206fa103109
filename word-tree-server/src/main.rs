mod config;

use actix_cors::Cors;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};
use word_tree_core::{format_completions, CompletionInput, Ranking, WordTree};

use config::ServerConfig;

/// Query parameters for the completion endpoints
#[derive(Deserialize)]
struct CompleteParams {
	prefix: Option<String>,
	n: Option<usize>,
	ranking: Option<String>,
}

/// Body of `/v1/completions/batch`
#[derive(Deserialize)]
struct BatchRequest {
	prefixes: Vec<String>,
	n: Option<usize>,
	ranking: Option<String>,
}

#[derive(Serialize)]
struct Stats<'a> {
	name: &'a str,
	words: usize,
	nodes: usize,
}

/// Index and settings shared read-only by every worker
struct SharedData {
	tree: WordTree,
	config: ServerConfig,
}

/// Builds the query input from request values, falling back to the config.
fn completion_input(config: &ServerConfig, n: Option<usize>, ranking: Option<&str>) -> Result<CompletionInput, String> {
	let mut input = CompletionInput {
		limit: config.default_limit,
		ranking: config.ranking,
		framing: config.framing,
	};
	if let Some(n) = n {
		input.set_limit(n)?;
	}
	if let Some(ranking) = ranking {
		input.ranking = ranking.parse::<Ranking>()?;
	}
	Ok(input)
}

impl CompleteParams {
	fn prefix(&self) -> Result<&str, String> {
		match &self.prefix {
			Some(s) if !s.is_empty() => Ok(s.as_str()),
			_ => Err("Missing or empty prefix".to_owned()),
		}
	}
}

/// HTTP GET endpoint `/v1/complete`
///
/// Returns the completions as one framed line, as the C interface does.
#[get("/v1/complete")]
async fn get_complete(data: web::Data<SharedData>, query: web::Query<CompleteParams>) -> impl Responder {
	let prefix = match query.prefix() {
		Ok(p) => p,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let input = match completion_input(&data.config, query.n, query.ranking.as_deref()) {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let completions = data.tree.complete(prefix, &input);
	HttpResponse::Ok().body(format_completions(&completions, input.framing))
}

/// HTTP GET endpoint `/v1/completions`
///
/// Returns the completions with their frequencies as JSON.
#[get("/v1/completions")]
async fn get_completions(data: web::Data<SharedData>, query: web::Query<CompleteParams>) -> impl Responder {
	let prefix = match query.prefix() {
		Ok(p) => p,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let input = match completion_input(&data.config, query.n, query.ranking.as_deref()) {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	HttpResponse::Ok().json(data.tree.complete(prefix, &input))
}

#[post("/v1/completions/batch")]
async fn post_batch(data: web::Data<SharedData>, body: web::Json<BatchRequest>) -> impl Responder {
	if body.prefixes.iter().any(String::is_empty) {
		return HttpResponse::BadRequest().body("Empty prefix in batch");
	}
	let input = match completion_input(&data.config, body.n, body.ranking.as_deref()) {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	// CPU-bound fan-out, kept off the async workers
	let data = data.into_inner();
	let request = body.into_inner();
	let results = web::block(move || data.tree.complete_many(&request.prefixes, &input)).await;
	match results {
		Ok(results) => HttpResponse::Ok().json(results),
		Err(e) => HttpResponse::InternalServerError().body(format!("Batch failed: {e}")),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(Stats {
		name: data.tree.name(),
		words: data.tree.len(),
		nodes: data.tree.node_count(),
	})
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_complete)
		.service(get_completions)
		.service(post_batch)
		.service(get_stats);
}

/// Main entry point for the server.
///
/// Loads the configuration, builds the index once, and serves it
/// read-only. The index is complete before the server binds.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::load().map_err(std::io::Error::other)?;
	info!(
		"loading vocabulary {} (default limit {}, ranking {:?}, framing {:?})",
		config.vocabulary.display(),
		config.default_limit,
		config.ranking,
		config.framing
	);
	let tree = WordTree::new(&config.vocabulary).map_err(|e| {
		error!("failed to build word tree: {e}");
		std::io::Error::other(e)
	})?;

	let bind = (config.host.clone(), config.port);
	let shared_data = web::Data::new(SharedData { tree, config });
	info!("listening on {}:{}", bind.0, bind.1);

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "POST"]))
			.app_data(shared_data.clone())
			.configure(routes)
	})
		.bind(bind)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};
	use std::io::Cursor;
	use word_tree_core::Completion;

	fn shared() -> web::Data<SharedData> {
		let tree = WordTree::from_reader("animals", Cursor::new("15\ncar 30\ncart 10\ncat 50\ndog 90\n")).unwrap();
		web::Data::new(SharedData { tree, config: ServerConfig::default() })
	}

	#[actix_web::test]
	async fn complete_returns_framed_line() {
		let app = test::init_service(App::new().app_data(shared()).configure(routes)).await;
		let req = test::TestRequest::get().uri("/v1/complete?prefix=ca&n=2").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "cart ca");
	}

	#[actix_web::test]
	async fn completions_returns_json() {
		let app = test::init_service(App::new().app_data(shared()).configure(routes)).await;
		let req = test::TestRequest::get().uri("/v1/completions?prefix=ca&n=2&ranking=most").to_request();
		let completions: Vec<Completion> = test::call_and_read_body_json(&app, req).await;
		let words: Vec<&str> = completions.iter().map(|c| c.word.as_str()).collect();
		assert_eq!(words, ["cat", "car"]);
	}

	#[actix_web::test]
	async fn rejects_bad_parameters() {
		let app = test::init_service(App::new().app_data(shared()).configure(routes)).await;
		for uri in ["/v1/complete", "/v1/complete?prefix=", "/v1/complete?prefix=ca&n=0", "/v1/completions?prefix=ca&ranking=best"] {
			let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}
	}

	#[actix_web::test]
	async fn batch_keeps_request_order() {
		let app = test::init_service(App::new().app_data(shared()).configure(routes)).await;
		let req = test::TestRequest::post()
			.uri("/v1/completions/batch")
			.set_json(batch_body(&["d", "ca", "x"]))
			.to_request();
		let results: Vec<Vec<Completion>> = test::call_and_read_body_json(&app, req).await;
		assert_eq!(results.len(), 3);
		assert_eq!(results[0][0].word, "dog");
		assert_eq!(results[1].len(), 3);
		assert!(results[2].is_empty());
	}

	#[actix_web::test]
	async fn stats_reports_index_size() {
		let app = test::init_service(App::new().app_data(shared()).configure(routes)).await;
		let req = test::TestRequest::get().uri("/v1/stats").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, r#"{"name":"animals","words":4,"nodes":8}"#);
	}

	#[derive(Serialize)]
	struct BatchBody<'a> {
		prefixes: &'a [&'a str],
	}

	fn batch_body<'a>(prefixes: &'a [&'a str]) -> BatchBody<'a> {
		BatchBody { prefixes }
	}
}
