use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use nbfolio::application::{preview::CellPresenter, scaffold};
use nbfolio::domain::Notebook;
use nbfolio::infra::telemetry::{CELLS_DEGRADED_TOTAL, CELLS_PRESENTED_TOTAL, FILES_GENERATED_TOTAL};

const FIXTURE: &str = include_str!("fixtures/analysis.ipynb");

fn counter_value(snapshotter: &Snapshotter, name: &str) -> Option<u64> {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .find(|(composite_key, _, _, _)| composite_key.key().name() == name)
        .and_then(|(_, _, _, value)| match value {
            DebugValue::Counter(count) => Some(count),
            _ => None,
        })
}

#[test]
fn preview_counts_presented_and_degraded_cells() {
    let notebook = Notebook::from_json_str(FIXTURE).expect("fixture parses");
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        CellPresenter::new().present_notebook(&notebook);
    });

    let unknown = notebook.cells().iter().filter(|cell| cell.is_unknown()).count();
    assert_eq!(
        counter_value(&snapshotter, CELLS_PRESENTED_TOTAL),
        Some(notebook.len() as u64)
    );
    assert_eq!(
        counter_value(&snapshotter, CELLS_DEGRADED_TOTAL),
        Some(unknown as u64)
    );
    assert_eq!(unknown, 1);
}

#[test]
fn export_counts_written_files() {
    let notebook = Notebook::from_json_str(FIXTURE).expect("fixture parses");
    let dir = tempfile::tempdir().expect("temp dir");
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let written = metrics::with_local_recorder(&recorder, || {
        scaffold::write_project(&notebook, dir.path(), true).expect("project written")
    });

    assert_eq!(
        counter_value(&snapshotter, FILES_GENERATED_TOTAL),
        Some(written.len() as u64)
    );
    assert_eq!(counter_value(&snapshotter, CELLS_PRESENTED_TOTAL), None);
}
