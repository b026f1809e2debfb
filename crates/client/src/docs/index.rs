//! Ephemeral full-text index over extracted documents.
//!
//! Built fresh in RAM for every query and discarded afterwards. Ranking is
//! Tantivy's BM25 scoring; both the content and the filename are searchable.

use tantivy::{
    Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument,
    collector::TopDocs,
    query::QueryParser,
    schema::{Field, STORED, Schema, TEXT, Value},
};

use super::archive::DocEntry;
use sourcetap_core::Error;

/// In-memory search index over a fixed set of documents.
pub struct DocIndex {
    index: Index,
    reader: IndexReader,
    fields: DocFields,
}

/// Schema fields for the docs index.
struct DocFields {
    filename: Field,
    content: Field,
}

impl DocIndex {
    /// Build an in-RAM index over the given documents.
    pub fn build(docs: &[DocEntry]) -> Result<Self, Error> {
        let mut schema_builder = Schema::builder();
        let filename = schema_builder.add_text_field("filename", TEXT | STORED);
        let content = schema_builder.add_text_field("content", TEXT | STORED);
        let schema = schema_builder.build();

        let index = Index::create_in_ram(schema);
        let fields = DocFields { filename, content };

        let mut writer: IndexWriter = index
            .writer(50_000_000)
            .map_err(|e| Error::Index(e.to_string()))?;

        for doc in docs {
            let mut document = TantivyDocument::new();
            document.add_text(fields.filename, &doc.filename);
            document.add_text(fields.content, &doc.content);
            writer
                .add_document(document)
                .map_err(|e| Error::Index(e.to_string()))?;
        }

        writer.commit().map_err(|e| Error::Index(e.to_string()))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e: tantivy::TantivyError| Error::Index(e.to_string()))?;
        reader.reload().map_err(|e| Error::Index(e.to_string()))?;

        Ok(Self { index, reader, fields })
    }

    /// Search the index, returning up to `limit` ranked documents.
    pub fn search(&self, query_text: &str, limit: usize) -> Result<Vec<DocEntry>, Error> {
        let searcher = self.reader.searcher();

        let query_parser =
            QueryParser::for_index(&self.index, vec![self.fields.content, self.fields.filename]);
        let query = query_parser
            .parse_query_lenient(query_text)
            .0;

        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .map_err(|e| Error::Index(e.to_string()))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (_score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| Error::Index(e.to_string()))?;

            let filename = doc
                .get_first(self.fields.filename)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            let content = doc
                .get_first(self.fields.content)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            results.push(DocEntry { filename, content });
        }

        tracing::debug!("search for '{}': {} results", query_text, results.len());
        Ok(results)
    }
}
