use std::time::Duration;

use datasync_notifier::handler::function_handler;
use httpmock::prelude::*;
use lambda_runtime::service_fn;

const REQUEST_ID: &str = "8476a536-e9f4-11e8-9739-2dfe598c3fcd";
const NEXT_PATH: &str = "/2018-06-01/runtime/invocation/next";

fn set_lambda_env(runtime_api: &str) {
    // SAFETY: this is the only test in this binary and it sets the variables
    // before the runtime under test reads them.
    unsafe {
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", runtime_api);
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "datasync-notifier");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "128");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "$LATEST");
        std::env::set_var("AWS_LAMBDA_LOG_STREAM_NAME", "2024/03/11/[$LATEST]abcdef");
        std::env::set_var("AWS_LAMBDA_LOG_GROUP_NAME", "/aws/lambda/datasync-notifier");
    }
}

async fn wait_for_hits(mock: &httpmock::Mock<'_>) -> usize {
    for _ in 0..100 {
        let hits = mock.hits_async().await;
        if hits > 0 {
            return hits;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    0
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unparsable_payload_is_reported_and_loop_continues() {
    let server = MockServer::start_async().await;
    let next = server
        .mock_async(|when, then| {
            when.method(GET).path(NEXT_PATH);
            then.status(200)
                .header("lambda-runtime-aws-request-id", REQUEST_ID)
                .header("lambda-runtime-deadline-ms", "1542409706888")
                .header(
                    "lambda-runtime-invoked-function-arn",
                    "arn:aws:lambda:us-east-1:123456789012:function:datasync-notifier",
                )
                .body("not json")
                .delay(Duration::from_millis(50));
        })
        .await;
    let error = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/2018-06-01/runtime/invocation/{REQUEST_ID}/error"));
            then.status(202);
        })
        .await;
    let response = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/2018-06-01/runtime/invocation/{REQUEST_ID}/response"));
            then.status(202);
        })
        .await;

    set_lambda_env(&server.address().to_string());
    let runtime = tokio::spawn(lambda_runtime::run(service_fn(function_handler)));

    assert!(
        wait_for_hits(&error).await > 0,
        "the invocation error was not reported"
    );
    // A second poll of /next means the loop survived the bad payload.
    for _ in 0..100 {
        if next.hits_async().await > 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(next.hits_async().await > 1, "the runtime stopped polling");
    assert!(!runtime.is_finished());
    assert_eq!(response.hits_async().await, 0);

    runtime.abort();
}
