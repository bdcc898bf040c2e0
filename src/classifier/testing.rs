//! Test fixtures: tiny multilingual corpus + multinomial Naive Bayes fitter

use std::collections::{BTreeMap, BTreeSet};

use super::artifact::{Analyzer, EstimatorSpec, PipelineArtifact, VectorizerSpec, FORMAT_VERSION};
use super::vectorizer::analyze;

/// (label, text) pairs, labels lowercase like a typical sklearn export
pub fn sample_corpus() -> Vec<(&'static str, &'static str)> {
    vec![
        ("it", "Questo museo conserva opere d'arte del Rinascimento italiano."),
        ("it", "Il testo di questa sala è scritto in italiano per i visitatori."),
        ("it", "Questo quadro è un capolavoro dipinto nel sedicesimo secolo."),
        ("it", "La galleria del museo è aperta tutti i giorni dalle nove."),
        ("it", "Questa scultura in marmo è stata restaurata di recente."),
        ("it", "Un testo breve descrive la storia di ogni opera esposta."),
        ("en", "This museum holds works of art from the Italian Renaissance."),
        ("en", "The painting hangs in the main gallery on the north side."),
        ("en", "The text in this room is written in English for visitors."),
        ("en", "This marble sculpture was restored recently by the museum."),
        ("en", "The gallery is open every day from nine in the morning."),
        ("en", "A short label describes the history of each painting."),
        ("fr", "Ce musée conserve des œuvres d'art de la Renaissance italienne."),
        ("fr", "Cette sculpture en marbre est exposée dans la salle principale."),
        ("fr", "Le texte de cette salle est écrit en français pour les visiteurs."),
        ("fr", "La galerie des antiquités est ouverte tous les jours."),
        ("fr", "Ce tableau est un chef-d'œuvre peint au seizième siècle."),
        ("fr", "Une courte notice décrit l'histoire de chaque œuvre."),
        ("de", "Dieses Museum bewahrt Kunstwerke aus der italienischen Renaissance."),
        ("de", "Das Gemälde hängt in der großen Galerie im Nordflügel."),
        ("de", "Der Text in diesem Raum wurde für die Besucher auf Deutsch geschrieben."),
        ("de", "Diese Skulptur aus Marmor wurde im letzten Jahr restauriert."),
        ("de", "Das Bild wurde im neunzehnten Jahrhundert gemalt."),
        ("de", "Die Galerie ist jeden Tag ab neun Uhr geöffnet."),
        ("es", "Este museo conserva obras de arte del Renacimiento italiano."),
        ("es", "La exposición de pintura está en la sala principal del museo."),
        ("es", "El texto de esta sala está escrito en español para los visitantes."),
        ("es", "Esta escultura de mármol fue restaurada hace poco tiempo."),
        ("es", "La galería está abierta todos los días desde las nueve."),
        ("es", "Una breve descripción cuenta la historia de cada obra."),
    ]
}

/// Fit a count-based multinomial NB pipeline (Laplace smoothing, empirical priors)
pub fn fit_naive_bayes(
    corpus: &[(&str, &str)],
    analyzer: Analyzer,
    ngram_range: (usize, usize),
) -> PipelineArtifact {
    let classes: Vec<String> = corpus
        .iter()
        .map(|(label, _)| label.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let documents: Vec<(usize, Vec<String>)> = corpus
        .iter()
        .map(|(label, text)| {
            let class = classes.iter().position(|c| c.as_str() == *label).unwrap();
            (class, analyze(analyzer, ngram_range, true, text))
        })
        .collect();

    let vocabulary: BTreeMap<String, usize> = documents
        .iter()
        .flat_map(|(_, terms)| terms.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(i, term)| (term, i))
        .collect();

    let n_features = vocabulary.len();
    let mut counts = vec![vec![0.0f64; n_features]; classes.len()];
    let mut doc_counts = vec![0.0f64; classes.len()];

    for (class, terms) in &documents {
        doc_counts[*class] += 1.0;
        for term in terms {
            counts[*class][vocabulary[term]] += 1.0;
        }
    }

    let alpha = 1.0;
    let feature_log_prob: Vec<Vec<f64>> = counts
        .iter()
        .map(|row| {
            let total: f64 = row.iter().sum::<f64>() + alpha * n_features as f64;
            row.iter().map(|c| ((c + alpha) / total).ln()).collect::<Vec<f64>>()
        })
        .collect();
    let n_docs = documents.len() as f64;
    let class_log_prior: Vec<f64> = doc_counts.iter().map(|d| (d / n_docs).ln()).collect();

    PipelineArtifact {
        format_version: FORMAT_VERSION,
        name: Some("museum-lang-nb-test".to_string()),
        classes,
        vectorizer: VectorizerSpec {
            analyzer,
            ngram_range,
            lowercase: true,
            vocabulary,
            idf: None,
            sublinear_tf: false,
            norm: None,
        },
        estimator: EstimatorSpec::MultinomialNb { class_log_prior, feature_log_prob },
    }
}
