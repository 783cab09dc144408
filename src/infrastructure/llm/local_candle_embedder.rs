use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub const DEFAULT_LOCAL_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Sentence embeddings from a BERT checkpoint on the Hub, mean-pooled and
/// L2-normalised so L2 distance tracks semantic closeness.
pub struct LocalCandleEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

fn load_err(what: &str, e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::ModelLoadFailed(format!("{}: {}", what, e))
}

fn infer_err(e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::InferenceFailed(e.to_string())
}

impl LocalCandleEmbedder {
    pub fn new(model_id: &str) -> Result<Self, EmbedderError> {
        let device = Device::Cpu;

        tracing::info!(model = model_id, "Loading local sentence embedding model");

        let api = Api::new().map_err(|e| load_err("hub client", e))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| load_err("config.json", e))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_err("tokenizer.json", e))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| load_err("model.safetensors", e))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| load_err("read config", e))?;
        let config: BertConfig = serde_json::from_str(&config_contents)
            .map_err(|e| load_err("parse config", e))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| load_err("tokenizer", e))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: config.max_position_embeddings,
                ..Default::default()
            }))
            .map_err(|e| load_err("truncation", e))?;

        // SAFETY: the safetensors file is memory-mapped read-only.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| load_err("weights", e))?
        };

        let model =
            BertModel::load(vb, &config).map_err(|e| load_err("model", e))?;

        tracing::info!(
            hidden_size = config.hidden_size,
            "Local sentence embedding model ready"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    fn encode_texts(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbedderError::InferenceFailed(format!("tokenization: {}", e)))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut input_ids = Vec::with_capacity(texts.len() * max_len);
        let mut type_ids = Vec::with_capacity(texts.len() * max_len);
        let mut mask = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let pad_len = max_len - encoding.get_ids().len();

            input_ids.extend_from_slice(encoding.get_ids());
            input_ids.extend(std::iter::repeat_n(0u32, pad_len));

            type_ids.extend_from_slice(encoding.get_type_ids());
            type_ids.extend(std::iter::repeat_n(0u32, pad_len));

            mask.extend_from_slice(encoding.get_attention_mask());
            mask.extend(std::iter::repeat_n(0u32, pad_len));
        }

        let shape = (texts.len(), max_len);
        let input_ids = Tensor::from_vec(input_ids, shape, &self.device).map_err(infer_err)?;
        let type_ids = Tensor::from_vec(type_ids, shape, &self.device).map_err(infer_err)?;
        let mask = Tensor::from_vec(mask, shape, &self.device).map_err(infer_err)?;

        let hidden = self
            .model
            .forward(&input_ids, &type_ids, Some(&mask))
            .map_err(infer_err)?;

        // Mean over real tokens only.
        let mask = mask.to_dtype(DType::F32).map_err(infer_err)?;
        let summed = hidden
            .broadcast_mul(&mask.unsqueeze(2).map_err(infer_err)?)
            .and_then(|t| t.sum(1))
            .map_err(infer_err)?;
        let counts = mask
            .sum(1)
            .and_then(|t| t.unsqueeze(1))
            .map_err(infer_err)?;
        let pooled = summed.broadcast_div(&counts).map_err(infer_err)?;

        (0..texts.len())
            .map(|i| {
                let values: Vec<f32> = pooled
                    .get(i)
                    .and_then(|row| row.to_vec1())
                    .map_err(infer_err)?;
                Ok(Embedding::new(values).normalized().values)
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.encode_texts(&[text])?
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| EmbedderError::InferenceFailed("empty result".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let results = self.encode_texts(texts)?;
        Ok(results.into_iter().map(Embedding::new).collect())
    }
}
