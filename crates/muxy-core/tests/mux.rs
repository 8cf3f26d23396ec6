//! Concurrency tests for the multiplexer.

use muxy_core::{Method, Mux, Request, Response, StatusCode, Text};
use std::sync::Arc;

const PATHS: usize = 16;
const REQUESTS: usize = 512;

fn path(i: usize) -> String {
    format!("/route/{}", i)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch() {
    let mux = Arc::new(Mux::new());
    for i in 0..PATHS {
        mux.register(&path(i), Text::new(format!("handler {}", i))).unwrap();
    }

    let mut tasks = Vec::with_capacity(REQUESTS);
    for n in 0..REQUESTS {
        let mux = Arc::clone(&mux);
        tasks.push(tokio::spawn(async move {
            let i = n % PATHS;
            let res = mux.dispatch(Request::new(Method::Get, &path(i))).await;
            (i, res)
        }));
    }

    for task in tasks {
        let (i, res) = task.await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body_string(), Some(format!("handler {}", i)));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_misses_stable_under_concurrent_registration() {
    let mux = Arc::new(Mux::new());

    let writer = {
        let mux = Arc::clone(&mux);
        tokio::spawn(async move {
            for i in 0..PATHS {
                mux.register(&path(i), Text::new("registered")).unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..8 {
        let mux = Arc::clone(&mux);
        readers.push(tokio::spawn(async move {
            for _ in 0..64 {
                let res = mux.dispatch(Request::new(Method::Get, "/never-registered")).await;
                assert_eq!(res, Response::not_found());
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(mux.len(), PATHS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reregistration_settles_on_one_handler() {
    let mux = Arc::new(Mux::new());

    let mut writers = Vec::new();
    for w in 0..4 {
        let mux = Arc::clone(&mux);
        writers.push(tokio::spawn(async move {
            for _ in 0..32 {
                mux.register("/bye", Text::new(format!("writer {}", w))).unwrap();
                tokio::task::yield_now().await;
            }
        }));
    }
    for writer in writers {
        writer.await.unwrap();
    }

    let body = mux
        .dispatch(Request::new(Method::Get, "/bye"))
        .await
        .body_string()
        .unwrap();
    assert!(body.starts_with("writer "));
    assert_eq!(mux.len(), 1);
}
