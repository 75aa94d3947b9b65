use cftoc::config::CONTAINER_ID;
use cftoc::test_utils::fixtures::{article, page, toc_macro};
use cftoc::{PipelineStatus, PointerEvent, TocSupervisor, TokioScheduler};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn test_pipeline_on_tokio_timers() {
    LocalSet::new()
        .run_until(async {
            let page = Rc::new(page("<p>loading</p>", "https://wiki.local/display/A"));
            let supervisor = TocSupervisor::new(page.clone(), Rc::new(TokioScheduler));
            supervisor.start();

            tokio::time::sleep(Duration::from_millis(4500)).await;
            assert_eq!(supervisor.snapshot().attempts, 3);
            assert_eq!(supervisor.snapshot().status, PipelineStatus::Searching);

            page.replace_body(&article(&toc_macro()));
            tokio::time::sleep(Duration::from_millis(2000)).await;
            assert_eq!(page.count_by_id(CONTAINER_ID), 1);
            assert_eq!(supervisor.snapshot().attempts, 4);

            supervisor.pointer(PointerEvent::Enter);
            supervisor.pointer(PointerEvent::Leave);
            tokio::time::sleep(Duration::from_millis(400)).await;
            assert!(supervisor.snapshot().expanded);
            tokio::time::sleep(Duration::from_millis(200)).await;
            assert!(!supervisor.snapshot().expanded);
        })
        .await;
}
