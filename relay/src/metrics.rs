use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    summaries: IntCounterVec,
    uploads: IntCounter,
    emails_sent: IntCounter,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let summaries = IntCounterVec::new(
            Opts::new("summaries_total", "Summaries produced, by path"),
            &["path"],
        )?;
        let uploads = IntCounter::new("uploads_total", "Text files accepted for summarization")?;
        let emails_sent = IntCounter::new("emails_sent_total", "Summary emails delivered")?;

        registry.register(Box::new(summaries.clone()))?;
        registry.register(Box::new(uploads.clone()))?;
        registry.register(Box::new(emails_sent.clone()))?;

        Ok(Self {
            registry,
            summaries,
            uploads,
            emails_sent,
        })
    }

    pub fn record_summary(&self, used_fallback: bool) {
        let path = if used_fallback { "fallback" } else { "remote" };
        self.summaries.with_label_values(&[path]).inc();
    }

    pub fn record_upload(&self) {
        self.uploads.inc();
    }

    pub fn record_email(&self) {
        self.emails_sent.inc();
    }

    /// Text exposition plus its content type.
    pub fn render(&self) -> prometheus::Result<(Vec<u8>, String)> {
        let encoder = TextEncoder::new();
        let mut buffer = vec![];
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok((buffer, encoder.format_type().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let metrics = Metrics::new().unwrap();
        metrics.record_summary(true);
        metrics.record_summary(true);
        metrics.record_summary(false);
        metrics.record_upload();

        let (body, content_type) = metrics.render().unwrap();
        let text = String::from_utf8(body).unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert!(text.contains("summaries_total{path=\"fallback\"} 2"));
        assert!(text.contains("summaries_total{path=\"remote\"} 1"));
        assert!(text.contains("uploads_total 1"));
        assert!(text.contains("emails_sent_total 0"));
    }
}
