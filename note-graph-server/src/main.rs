use std::sync::{Mutex, MutexGuard, PoisonError};

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use note_graph_core::{Generator, GeneratorConfig, GraphError, Note, NoteGraph, ReinforcementConfig, Reinforcer, Sequence, NOTE_COUNT};

/// Command line arguments of the server.
#[derive(Parser, Debug)]
#[command(version, about = "HTTP interface to a rating-trained note generator")]
struct Args {
	/// Address to bind.
	#[arg(long, default_value = "127.0.0.1")]
	bind: String,

	/// Port to listen on.
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Seed for the random walk. Seeded from the OS when omitted.
	#[arg(long)]
	seed: Option<u64>,

	/// Renormalize touched rows after each update.
	#[arg(long)]
	renormalize: bool,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	burn_in: Option<usize>,
	length: Option<usize>,
}

/// Query parameters for the `/v1/rate` endpoint
#[derive(Deserialize)]
struct RateParams {
	rating: Option<i64>,
	sequence: Option<String>, // comma separated note names, ex. "e2,f2,g2"
}

/// Query parameters for the `/v1/weights` endpoint
#[derive(Deserialize)]
struct WeightsParams {
	from: Option<String>,
	top: Option<usize>,
}

/// Graph and randomness shared by every worker.
///
/// Requests are serialized by the surrounding `Mutex`, so a rating never
/// interleaves with a generation.
struct SharedData {
	graph: NoteGraph,
	rng: StdRng,
	reinforcer: Reinforcer,
}

/// Locks the shared graph, recovering it if a previous holder panicked.
///
/// Every update leaves the graph consistent edge by edge, so a poisoned lock
/// still guards usable weights.
fn lock_shared(data: &Mutex<SharedData>) -> MutexGuard<'_, SharedData> {
	data.lock().unwrap_or_else(|poisoned| {
		log::warn!("graph lock was poisoned, recovering");
		PoisonError::into_inner(poisoned)
	})
}

/// Parses a comma separated list of note names.
fn parse_sequence(s: &str) -> Result<Sequence, GraphError> {
	let notes = s
		.split(',')
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(str::parse::<Note>)
		.collect::<Result<Vec<_>, _>>()?;
	Ok(Sequence::new(notes))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Walks the shared graph and returns the sequence as a JSON array of note names.
/// `burn_in` and `length` above their limits are rejected before the graph is locked.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let defaults = GeneratorConfig::default();
	let generator = match Generator::new(GeneratorConfig {
		burn_in: query.burn_in.unwrap_or(defaults.burn_in),
		sequence_length: query.length.unwrap_or(defaults.sequence_length),
	}) {
		Ok(g) => g,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let mut shared_data = lock_shared(&data);
	let SharedData { graph, rng, .. } = &mut *shared_data;

	HttpResponse::Ok().json(generator.generate(graph, rng))
}

/// HTTP PUT endpoint `/v1/rate`
///
/// Applies a rating to a previously generated sequence.
/// Out-of-range ratings and unknown notes are rejected without touching the graph.
#[put("/v1/rate")]
async fn put_rating(data: web::Data<Mutex<SharedData>>, query: web::Query<RateParams>) -> impl Responder {
	let rating = match query.rating {
		Some(r) => r,
		None => return HttpResponse::BadRequest().body("Missing rating"),
	};
	let sequence = match &query.sequence {
		Some(s) if !s.trim().is_empty() => match parse_sequence(s) {
			Ok(seq) => seq,
			Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
		},
		_ => return HttpResponse::BadRequest().body("Missing or empty sequence"),
	};

	let mut shared_data = lock_shared(&data);
	let SharedData { graph, reinforcer, .. } = &mut *shared_data;

	match reinforcer.rate(graph, &sequence, rating) {
		Ok(()) => HttpResponse::Ok().body("Rating applied"),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/weights`
///
/// Returns the heaviest outgoing edges of one note as `[note, weight]` pairs.
#[get("/v1/weights")]
async fn get_weights(data: web::Data<Mutex<SharedData>>, query: web::Query<WeightsParams>) -> impl Responder {
	let from = match query.from.as_deref().map(str::parse::<Note>) {
		Some(Ok(note)) => note,
		Some(Err(e)) => return HttpResponse::BadRequest().body(e.to_string()),
		None => return HttpResponse::BadRequest().body("Missing source note"),
	};
	let top = query.top.unwrap_or(NOTE_COUNT);

	let shared_data = lock_shared(&data);
	HttpResponse::Ok().json(shared_data.graph.strongest_successors(from, top))
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(put_rating)
		.service(get_weights);
}

/// Main entry point for the server.
///
/// Builds a fresh uniform graph, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server.
///
/// # Notes
/// - Learned weights live in memory only and are lost on shutdown.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};
	let shared_data = SharedData {
		graph: NoteGraph::new(),
		rng,
		reinforcer: Reinforcer::new(ReinforcementConfig { renormalize: args.renormalize }),
	};
	let shared_graph = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on {}:{}", args.bind, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_graph.clone())
			.configure(configure)
	})
		.bind((args.bind.as_str(), args.port))?
		.run()
		.await
}
