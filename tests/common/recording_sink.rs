use std::sync::Mutex;

use sports_ingest_rs::{ingest_api::IngestSink, models_api::ingest::IngestedMatch};

#[derive(Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<Vec<IngestedMatch>>>,
}

impl IngestSink for RecordingSink {
    fn store(&self, batch: &[IngestedMatch]) {
        self.batches.lock().expect("sink lock").push(batch.to_vec());
    }
}

impl RecordingSink {
    pub fn batches(&self) -> Vec<Vec<IngestedMatch>> {
        self.batches.lock().expect("sink lock").clone()
    }
}
