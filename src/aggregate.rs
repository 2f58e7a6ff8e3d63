//! Cross-document aggregation.
//!
//! Records are folded strictly in input order. All rankings are stable
//! sorts over insertion order, so ties resolve the same way on every run.

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

use crate::lexical::TermCounter;
use crate::record::DocumentRecord;
use crate::sentences;

/// Aggregation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Length of the reported global ranking.
    ///
    /// Default: `50`
    pub ranking_top_n: usize,

    /// Number of top global terms that become co-occurrence nodes.
    ///
    /// Default: `30`
    pub cooccurrence_top_n: usize,

    /// Number of top global terms in the keyword presence matrix.
    ///
    /// Default: `20`
    pub presence_top_n: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            ranking_top_n: 50,
            cooccurrence_top_n: 30,
            presence_top_n: 20,
        }
    }
}

/// Term counts summed over a document set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GlobalRanking {
    counts: TermCounter,
}

impl GlobalRanking {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `records` in order.
    #[must_use]
    pub fn from_records(records: &[DocumentRecord]) -> Self {
        let mut ranking = Self::new();
        for record in records {
            ranking.fold(record);
        }
        ranking
    }

    /// Add one record's contribution: +1 per top term, +count per n-gram of
    /// the combined counter, +1 per key-sentence word.
    pub fn fold(&mut self, record: &DocumentRecord) {
        for term in record.top_terms() {
            self.counts.increment(term);
        }
        self.counts.merge(record.combined());
        for sentence in record.key_sentences() {
            for word in sentences::sentence_words(sentence) {
                self.counts.increment(&word);
            }
        }
    }

    #[must_use]
    pub fn count(&self, term: &str) -> usize {
        self.counts.get(term)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` highest-count terms, ties by first fold order.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        self.counts
            .most_common(n)
            .into_iter()
            .map(|(term, count)| (term.to_string(), count))
            .collect()
    }

    /// The `n` highest-count terms without their counts.
    #[must_use]
    pub fn top_terms(&self, n: usize) -> Vec<String> {
        self.most_common(n).into_iter().map(|(term, _)| term).collect()
    }
}

/// The terms of a record that can take part in aggregation views: its top
/// terms followed by the rest of its combined counter.
fn keyword_set(record: &DocumentRecord) -> IndexSet<&str> {
    record
        .top_terms()
        .iter()
        .map(String::as_str)
        .chain(record.combined().terms())
        .collect()
}

/// Weighted undirected edge between two top terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// The higher-ranked endpoint.
    pub source: String,
    pub target: String,
    /// Number of documents in which both terms appear.
    pub weight: usize,
}

/// Co-occurrence graph over the top global terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CooccurrenceGraph {
    /// Node terms in rank order.
    pub nodes: Vec<String>,
    /// Edges in creation order.
    pub edges: Vec<Edge>,
}

impl CooccurrenceGraph {
    /// Connect every pair of top-`top_n` terms sharing a document.
    #[must_use]
    pub fn build(ranking: &GlobalRanking, records: &[DocumentRecord], top_n: usize) -> Self {
        let nodes = ranking.top_terms(top_n);
        let rank: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let mut edge_index: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::new();

        for record in records {
            let mut present: Vec<usize> = keyword_set(record)
                .into_iter()
                .filter_map(|term| rank.get(term).copied())
                .collect();
            present.sort_unstable();

            for (i, &a) in present.iter().enumerate() {
                for &b in &present[i + 1..] {
                    match edge_index.get(&(a, b)) {
                        Some(&idx) => edges[idx].weight += 1,
                        None => {
                            edge_index.insert((a, b), edges.len());
                            edges.push(Edge {
                                source: nodes[a].clone(),
                                target: nodes[b].clone(),
                                weight: 1,
                            });
                        }
                    }
                }
            }
        }

        Self { nodes, edges }
    }

    /// Weight of the edge between `a` and `b`, in either direction.
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> usize {
        self.edges
            .iter()
            .find(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
            .map_or(0, |e| e.weight)
    }

    /// Edges as `(term, term, weight)` triples.
    #[must_use]
    pub fn triples(&self) -> Vec<(&str, &str, usize)> {
        self.edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.weight))
            .collect()
    }
}

/// Which top terms each document contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordPresence {
    /// Column terms in rank order.
    pub terms: Vec<String>,
    /// One row per record: identifier and one flag per term.
    pub rows: Vec<(String, Vec<bool>)>,
}

impl KeywordPresence {
    #[must_use]
    pub fn build(ranking: &GlobalRanking, records: &[DocumentRecord], top_n: usize) -> Self {
        let terms = ranking.top_terms(top_n);
        let rows = records
            .iter()
            .map(|record| {
                let keywords = keyword_set(record);
                let flags = terms.iter().map(|t| keywords.contains(t.as_str())).collect();
                (record.identifier().to_string(), flags)
            })
            .collect();

        Self { terms, rows }
    }
}

/// Everything derived from a batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Number of records, failed placeholders included.
    pub documents: usize,
    /// Number of failed placeholder records.
    pub failed: usize,
    /// The `ranking_top_n` most common terms.
    pub ranking: Vec<(String, usize)>,
    pub graph: CooccurrenceGraph,
    pub presence: KeywordPresence,
}

impl Aggregation {
    #[must_use]
    pub fn from_records(records: &[DocumentRecord], options: &AggregateOptions) -> Self {
        let global = GlobalRanking::from_records(records);
        let graph = CooccurrenceGraph::build(&global, records, options.cooccurrence_top_n);
        let presence = KeywordPresence::build(&global, records, options.presence_top_n);
        let failed = records.iter().filter(|r| r.is_failed()).count();

        debug!(
            documents = records.len(),
            failed,
            terms = global.len(),
            edges = graph.edges.len(),
            "Aggregated documents"
        );

        Self {
            documents: records.len(),
            failed,
            ranking: global.most_common(options.ranking_top_n),
            graph,
            presence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordParts;

    fn record(id: &str, terms: &[&str], sentences: &[&str]) -> DocumentRecord {
        let combined: TermCounter = terms.iter().collect();
        let top_terms = combined
            .most_common(3)
            .into_iter()
            .map(|(t, _)| t.to_string())
            .collect();
        DocumentRecord::from_parts(RecordParts {
            identifier: id.to_string(),
            combined,
            top_terms,
            key_sentences: sentences.iter().map(|s| (*s).to_string()).collect(),
            ..RecordParts::default()
        })
    }

    #[test]
    fn test_fold_sums_all_sources() {
        let records = [record("a", &["chat", "chat", "noir"], &["Le chat dort, vraiment."])];
        let ranking = GlobalRanking::from_records(&records);

        // top term (+1), combined count (+2), sentence word (+1)
        assert_eq!(ranking.count("chat"), 4);
        assert_eq!(ranking.count("noir"), 2);
        assert_eq!(ranking.count("vraiment"), 1);
        assert_eq!(ranking.count("dort"), 1);
        assert_eq!(ranking.count("le"), 0);
    }

    #[test]
    fn test_failed_records_contribute_nothing() {
        let records = [DocumentRecord::failed("x", "boom"), record("a", &["chat"], &[])];
        let aggregation = Aggregation::from_records(&records, &AggregateOptions::default());
        assert_eq!(aggregation.documents, 2);
        assert_eq!(aggregation.failed, 1);
        assert_eq!(aggregation.ranking, vec![("chat".to_string(), 2)]);
    }

    #[test]
    fn test_most_common_ties_follow_fold_order() {
        let records = [record("a", &["zeta"], &[]), record("b", &["alpha"], &[])];
        let ranking = GlobalRanking::from_records(&records);
        assert_eq!(ranking.top_terms(2), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_graph_weights_count_documents() {
        let records = [
            record("a", &["chat", "noir", "souris"], &[]),
            record("b", &["chat", "noir"], &[]),
            record("c", &["souris"], &[]),
        ];
        let ranking = GlobalRanking::from_records(&records);
        let graph = CooccurrenceGraph::build(&ranking, &records, 30);

        assert_eq!(graph.weight("chat", "noir"), 2);
        assert_eq!(graph.weight("noir", "chat"), 2);
        assert_eq!(graph.weight("chat", "souris"), 1);
        assert_eq!(graph.weight("noir", "souris"), 1);
        assert_eq!(graph.edges.len(), 3);
    }

    #[test]
    fn test_graph_restricted_to_top_n() {
        let records = [record("a", &["chat", "chat", "noir", "souris"], &[])];
        let ranking = GlobalRanking::from_records(&records);
        let graph = CooccurrenceGraph::build(&ranking, &records, 2);

        assert_eq!(graph.nodes, vec!["chat", "noir"]);
        assert_eq!(graph.triples(), vec![("chat", "noir", 1)]);
    }

    #[test]
    fn test_source_is_higher_ranked() {
        let records = [record("a", &["rare", "commun", "commun", "commun"], &[])];
        let ranking = GlobalRanking::from_records(&records);
        let graph = CooccurrenceGraph::build(&ranking, &records, 30);
        assert_eq!(graph.edges[0].source, "commun");
        assert_eq!(graph.edges[0].target, "rare");
    }

    #[test]
    fn test_presence_matrix() {
        let records = [record("a", &["chat", "chat"], &[]), record("b", &["noir"], &[])];
        let ranking = GlobalRanking::from_records(&records);
        let presence = KeywordPresence::build(&ranking, &records, 20);

        assert_eq!(presence.terms, vec!["chat", "noir"]);
        assert_eq!(presence.rows[0], ("a".to_string(), vec![true, false]));
        assert_eq!(presence.rows[1], ("b".to_string(), vec![false, true]));
    }

    #[test]
    fn test_empty_batch() {
        let aggregation = Aggregation::from_records(&[], &AggregateOptions::default());
        assert_eq!(aggregation.documents, 0);
        assert!(aggregation.ranking.is_empty());
        assert!(aggregation.graph.nodes.is_empty());
        assert!(aggregation.graph.edges.is_empty());
    }
}
