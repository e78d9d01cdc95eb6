use motif_core::io::{parse_motifs, FastaReader};
use motif_core::{AnnotateError, Annotator, LayoutConfig, LegendKind};
use std::io::Cursor;

const FASTA: &str = "\
>INSR chr19:7150261-7150808 (reverse complement)
atgtccacatgtagtcacgtttgacatcccagggccacctcagcaggccgtctctggggagaattttctctgatttcttccccttcccttgctggacccagcagcaccatg
CTGGGCAGGGAGGAGGCCCCCTGGGGGCCGACTTTCTCCCGAAGCGGCAGG
tgcagtctggaagtgctctgtgtagtgaccccttgcctg
>MBNL chr3:152446461-152447003
ttttgcatgatttcgcaaacatgtctgtaatccctcccgattctgtgtccctgtttgcag
GCTTTCTTCTGCCAGTTGTCTATAGCAGTGCCAGTGTTTGAAAGGCTGCACTCAACCAT
gtaagtttgatgtctataattttgg
>ATP2A1 chr16:28903467-28904044
gcaugtacactgcagcatg
GCATGGCGCGTGTCATGTACGTGCAUGCATGGAGG
tgcatggt
";

const MOTIFS: &str = "ygcy\nGCAUG\ncatag\nYYYYYYYYYY\n";

fn run(config: LayoutConfig, fasta: &str) -> motif_core::AnnotationRun {
    let motifs = parse_motifs(MOTIFS).expect("motifs compile");
    let records = FastaReader::read_reader(Cursor::new(fasta.as_bytes().to_vec()))
        .expect("parse FASTA");
    Annotator::new(motifs, config)
        .annotate(
            records.into_iter().map(|r| (r.id, r.sequence)),
            Some("Figure_1"),
        )
        .expect("annotate")
}

#[test]
fn layout_is_deterministic() {
    let a = serde_json::to_vec(&run(LayoutConfig::default(), FASTA).layout).unwrap();
    let b = serde_json::to_vec(&run(LayoutConfig::default(), FASTA).layout).unwrap();
    assert_eq!(a, b, "layout JSON differs between identical runs");
}

#[test]
fn slots_are_one_to_n_in_input_order() {
    let layout = run(LayoutConfig::default(), FASTA).layout;
    let ids: Vec<&str> = layout.records.iter().map(|r| r.id.as_str()).collect();
    let slots: Vec<usize> = layout.records.iter().map(|r| r.display_slot).collect();
    assert_eq!(ids, vec!["INSR", "MBNL", "ATP2A1"]);
    assert_eq!(slots, vec![1, 2, 3]);
    for record in &layout.records {
        assert_eq!(record.backbone.rect.y, record.display_slot as f64 * 200.0);
    }
}

#[test]
fn legend_has_motifs_then_exon_then_intron() {
    let layout = run(LayoutConfig::default(), FASTA).layout;
    let kinds: Vec<LegendKind> = layout.legend.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LegendKind::Motif { color_index: 1 },
            LegendKind::Motif { color_index: 2 },
            LegendKind::Motif { color_index: 3 },
            LegendKind::Motif { color_index: 4 },
            LegendKind::Exon,
            LegendKind::Intron,
        ]
    );
}

#[test]
fn ticks_match_sequence_offsets() {
    let result = run(LayoutConfig::default(), FASTA);
    for (record, geometry) in result.records.iter().zip(&result.layout.records) {
        let matches = record.motif_matches().unwrap();
        for (offsets, track) in matches.iter().zip(&geometry.motif_tracks) {
            let tick_offsets: Vec<usize> = track.ticks.iter().map(|t| t.offset).collect();
            assert_eq!(&tick_offsets, offsets);
            for tick in &track.ticks {
                assert_eq!(tick.x, 100.0 + tick.offset as f64);
            }
        }
        let exon = record.exon().unwrap();
        let exon_box = geometry.exon.unwrap();
        assert_eq!(exon_box.rect.x, 100.0 + exon.start as f64);
        assert_eq!(exon_box.rect.width, exon.length as f64);
    }
}

#[test]
fn rna_motif_finds_dna_sites() {
    let result = run(LayoutConfig::default(), FASTA);
    // GCAUG against the DNA strand of ATP2A1
    let atp = &result.records[2];
    assert!(!atp.motif_matches().unwrap()[1].is_empty());
}

#[test]
fn sequence_without_exon_aborts() {
    let fasta = format!("{}>lower\nacgtacgtacgt\n", FASTA);
    let motifs = parse_motifs(MOTIFS).unwrap();
    let records = FastaReader::read_reader(Cursor::new(fasta.into_bytes())).unwrap();
    let err = Annotator::new(motifs, LayoutConfig::default())
        .annotate(records.into_iter().map(|r| (r.id, r.sequence)), None)
        .unwrap_err();
    assert_eq!(err, AnnotateError::no_exon("lower"));
}
