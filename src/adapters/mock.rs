use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::{
    adapters::{Connector, FileBody, ObjectWriter},
    model::error::BoxError,
};

/// In-memory buckets shared between a connector, its clients and the test.
#[derive(Clone, Default)]
pub struct MockStore {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
    pub connects: Arc<AtomicUsize>,
    pub writes: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
}

impl MockStore {
    pub fn insert(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[derive(Default)]
pub struct MockConnector {
    pub store: MockStore,
    pub fail_connect: Option<String>,
    pub fail_write: Option<String>,
    pub hang_write: bool,
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self) -> Result<Box<dyn ObjectWriter>, BoxError> {
        self.store.connects.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.fail_connect {
            return Err(message.clone().into());
        }

        Ok(Box::new(MockClient {
            store: self.store.clone(),
            fail_write: self.fail_write.clone(),
            hang_write: self.hang_write,
        }))
    }
}

pub struct MockClient {
    store: MockStore,
    fail_write: Option<String>,
    hang_write: bool,
}

impl Drop for MockClient {
    fn drop(&mut self) {
        self.store.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectWriter for MockClient {
    async fn put_object_if_absent(
        &self,
        bucket: &str,
        key: &str,
        mut body: FileBody,
    ) -> Result<u64, BoxError> {
        self.store.writes.fetch_add(1, Ordering::SeqCst);

        if self.hang_write {
            std::future::pending::<()>().await;
        }

        let mut data = Vec::new();
        body.file.read_to_end(&mut data).await?;

        if let Some(message) = &self.fail_write {
            return Err(message.clone().into());
        }

        let mut objects = self.store.objects.lock().unwrap();
        let id = (bucket.to_string(), key.to_string());
        if objects.contains_key(&id) {
            return Err(format!("412 Precondition Failed: {}/{} already exists", bucket, key).into());
        }

        let len = data.len() as u64;
        objects.insert(id, data);

        Ok(len)
    }
}
