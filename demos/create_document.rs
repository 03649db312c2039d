//! Fires three concurrent submissions through a throttle of two permits with a five second
//! cooldown: two requests leave immediately, the third waits for a permit to cool down.
//!
//! Set `CRPT_ENDPOINT` to point the demo at a local mock instead of the production endpoint.

// std
use std::{env, time::Duration};
// crates.io
use color_eyre::Result;
use tokio::{task::JoinSet, time::Instant};
// self
use crpt_api::{
	client::{DocumentClient, ReqwestDocumentClient},
	document::Document,
	reqwest::Client as ReqwestClient,
	throttle::Throttle,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let throttle = Throttle::new(2, Duration::from_secs(5))?;
	let client: ReqwestDocumentClient = match env::var("CRPT_ENDPOINT") {
		Ok(endpoint) =>
			DocumentClient::with_reqwest_client(&endpoint, throttle.clone(), ReqwestClient::new())?,
		Err(_) => DocumentClient::new(throttle.clone())?,
	};
	let document = Document::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/document.json"))?;
	let started = Instant::now();
	let mut set = JoinSet::new();

	for idx in 0..3 {
		let client = client.clone();
		let document = document.clone();

		set.spawn(async move {
			let outcome = client.create_document(&document, "mySign").await;

			(idx, outcome)
		});
	}

	while let Some(joined) = set.join_next().await {
		let (idx, outcome) = joined?;

		match outcome {
			Ok(response) => println!(
				"Submission {idx} finished after {:?} with status {}.",
				started.elapsed(),
				response.status
			),
			Err(e) => println!("Submission {idx} failed after {:?}: {e}.", started.elapsed()),
		}
	}

	println!("Free permits after the burst: {}.", throttle.available_permits());

	Ok(())
}
