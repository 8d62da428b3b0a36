use salt_events_core::{
    Classifier, Event, EventEnvelope, EventKind, JobNew, JobProgress, JobReturn, MinionAuth,
    MinionBeacon, MinionKey, MinionRefresh, MinionStart, PresenceChange, PresencePresent,
};
use salt_events_types::{StampFormat, Timestamp};
use serde_json::{json, Value};

fn decode(tag: &str, payload: Value) -> Event {
    Classifier::standard()
        .decode(tag, payload)
        .unwrap()
        .expect("tag should be known")
}

fn stamp(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

#[test]
fn job_new_decodes_all_fields() {
    let event = decode(
        "salt/job/20240101120000000001/new",
        json!({
            "_stamp": "2024-01-01T12:00:00.000001",
            "arg": ["nginx", {"__kwarg__": true, "test": true}],
            "fun": "pkg.install",
            "jid": "20240101120000000001",
            "minions": ["web01", "web02"],
            "missing": [],
            "tgt": "web*",
            "tgt_type": "glob",
            "user": "root"
        }),
    );

    let Event::JobNew(job) = event else {
        panic!("expected job_new");
    };
    assert_eq!(
        job,
        JobNew {
            arguments: vec![json!("nginx"), json!({"__kwarg__": true, "test": true})],
            function: "pkg.install".into(),
            job: "20240101120000000001".into(),
            minions: vec!["web01".into(), "web02".into()],
            target: json!("web*"),
            target_type: "glob".into(),
            time: stamp("2024-01-01T12:00:00.000001"),
            user: "root".into(),
        }
    );
}

#[test]
fn job_new_accepts_list_targets() {
    let event = decode(
        "salt/job/20240101120000000002/new",
        json!({"tgt": ["web01", "web02"], "tgt_type": "list"}),
    );
    let Event::JobNew(job) = event else {
        panic!("expected job_new");
    };
    assert_eq!(job.target, json!(["web01", "web02"]));
}

#[test]
fn job_return_decodes_all_fields() {
    let event = decode(
        "salt/job/20240101120000000001/ret/web01",
        json!({
            "_stamp": "2024-01-01T12:00:01.500000",
            "cmd": "_return",
            "fun": "cmd.run",
            "fun_args": ["uptime"],
            "id": "web01",
            "jid": "20240101120000000001",
            "out": "nested",
            "retcode": 0,
            "return": " 12:00:01 up 3 days",
            "success": true
        }),
    );

    assert_eq!(
        event,
        Event::JobReturn(JobReturn {
            arguments: vec![json!("uptime")],
            command: "_return".into(),
            function: "cmd.run".into(),
            job: "20240101120000000001".into(),
            minion: "web01".into(),
            output: "nested".into(),
            ret: json!(" 12:00:01 up 3 days"),
            return_code: 0,
            success: true,
            time: stamp("2024-01-01T12:00:01.500000"),
        })
    );
}

#[test]
fn job_progress_decodes_nested_state_result() {
    let event = decode(
        "salt/job/20240101120000000001/prog/web01/0",
        json!({
            "_master": "salt-master",
            "_stamp": "2024-01-01T12:00:02.250000",
            "cmd": "_minion_event",
            "data": {
                "len": 4,
                "ret": {
                    "__id__": "nginx",
                    "__run_num__": 0,
                    "__sls__": "web.nginx",
                    "changes": {"nginx": {"new": "1.24", "old": ""}},
                    "comment": "The following packages were installed",
                    "duration": 1532.7,
                    "name": "nginx",
                    "result": true,
                    "start_time": "12:00:00.717000"
                }
            },
            "id": "web01",
            "jid": "20240101120000000001"
        }),
    );

    let Event::JobProgress(JobProgress {
        master,
        command,
        minion,
        job,
        data,
        ..
    }) = event
    else {
        panic!("expected job_progress");
    };
    assert_eq!(master, "salt-master");
    assert_eq!(command, "_minion_event");
    assert_eq!(minion, "web01");
    assert_eq!(job, "20240101120000000001");
    assert_eq!(data.len, 4);
    assert_eq!(data.ret.state_id, "nginx");
    assert_eq!(data.ret.sls, "web.nginx");
    assert_eq!(data.ret.run_num, 0);
    assert_eq!(data.ret.duration, 1532.7);
    assert!(data.ret.result);
    assert_eq!(data.ret.changes["nginx"]["new"], json!("1.24"));
    assert_eq!(data.ret.start_time, "12:00:00.717000");
}

#[test]
fn minion_auth_and_key_decode() {
    let auth = decode(
        "salt/auth",
        json!({
            "_stamp": "2024-01-01T12:00:00.000000",
            "act": "pend",
            "id": "web03",
            "pub": "-----BEGIN PUBLIC KEY-----\nMIIB\n-----END PUBLIC KEY-----",
            "result": true
        }),
    );
    assert_eq!(
        auth,
        Event::MinionAuth(MinionAuth {
            key: "-----BEGIN PUBLIC KEY-----\nMIIB\n-----END PUBLIC KEY-----".into(),
            minion: "web03".into(),
            result: true,
            status: "pend".into(),
            time: stamp("2024-01-01T12:00:00"),
        })
    );

    let key = decode(
        "salt/key",
        json!({"_stamp": 1704110400.5, "act": "accept", "id": "web03", "result": true}),
    );
    assert_eq!(
        key,
        Event::MinionKey(MinionKey {
            minion: "web03".into(),
            result: true,
            status: "accept".into(),
            time: Timestamp::from_epoch_seconds(1704110400.5).unwrap(),
        })
    );
}

#[test]
fn minion_start_and_presence_decode() {
    assert_eq!(
        decode(
            "salt/minion/db01/start",
            json!({"_stamp": "2024-01-01T12:00:00Z", "id": "db01", "data": "Minion db01 started"}),
        ),
        Event::MinionStart(MinionStart {
            minion: "db01".into(),
            time: stamp("2024-01-01T12:00:00Z"),
        })
    );

    assert_eq!(
        decode(
            "salt/presence/change",
            json!({"lost": ["db02"], "new": ["db03", "db04"]}),
        ),
        Event::PresenceChange(PresenceChange {
            lost: vec!["db02".into()],
            new: vec!["db03".into(), "db04".into()],
            time: Timestamp::default(),
        })
    );

    assert_eq!(
        decode("salt/presence/present", json!({"present": ["db01"]})),
        Event::PresencePresent(PresencePresent {
            minions: vec!["db01".into()],
            time: Timestamp::default(),
        })
    );
}

#[test]
fn refresh_minion_comes_from_the_tag_when_payload_lacks_it() {
    let event = decode(
        "minion/refresh/my-minion-01",
        json!({"_stamp": "2024-01-01T12:00:00.000000"}),
    );
    assert_eq!(
        event,
        Event::MinionRefresh(MinionRefresh {
            minion: "my-minion-01".into(),
            time: stamp("2024-01-01T12:00:00"),
        })
    );
}

#[test]
fn refresh_minion_from_payload_wins_over_tag() {
    let event = decode("minion/refresh/from-tag", json!({"id": "from-payload"}));
    let Event::MinionRefresh(refresh) = event else {
        panic!("expected minion_refresh");
    };
    assert_eq!(refresh.minion, "from-payload");
}

#[test]
fn beacon_name_comes_from_the_tag() {
    let event = decode(
        "salt/beacon/web01/inotify/",
        json!({
            "_stamp": "2024-01-01T12:00:00.000000",
            "data": {"change": "IN_MODIFY", "path": "/etc/nginx/nginx.conf"},
            "id": "web01"
        }),
    );
    assert_eq!(
        event,
        Event::MinionBeacon(MinionBeacon {
            data: json!({"change": "IN_MODIFY", "path": "/etc/nginx/nginx.conf"}),
            minion: "web01".into(),
            name: "inotify".into(),
            time: stamp("2024-01-01T12:00:00"),
        })
    );
}

#[test]
fn missing_fields_keep_zero_values() {
    let event = decode("salt/job/20240101120000000001/ret", json!({}));
    assert_eq!(event, Event::JobReturn(JobReturn::default()));
    assert_eq!(event.time(), &Timestamp::default());
}

#[test]
fn null_fields_keep_zero_values() {
    let event = decode(
        "salt/job/20240101120000000001/ret",
        json!({
            "_stamp": null,
            "cmd": null,
            "fun_args": null,
            "jid": "20240101120000000001",
            "out": null,
            "retcode": null,
            "return": null,
            "success": null
        }),
    );
    assert_eq!(
        event,
        Event::JobReturn(JobReturn {
            job: "20240101120000000001".into(),
            ..JobReturn::default()
        })
    );

    let progress = decode(
        "salt/job/20240101120000000001/prog/web01/0",
        json!({"data": {"len": null, "ret": {"__sls__": null, "duration": null}}, "id": "web01"}),
    );
    let Event::JobProgress(progress) = progress else {
        panic!("expected job_progress");
    };
    assert_eq!(progress.minion, "web01");
    assert_eq!(progress.data, Default::default());

    let progress = decode(
        "salt/job/20240101120000000001/prog/web01/1",
        json!({"data": null}),
    );
    assert_eq!(progress, Event::JobProgress(JobProgress::default()));
}

#[test]
fn unknown_tag_yields_none_without_reading_payload() {
    let decoded = Classifier::standard()
        .decode("totally/unknown/tag", json!("not even an object"))
        .unwrap();
    assert!(decoded.is_none());
}

#[test]
fn decode_failure_names_the_matched_kind() {
    let err = Classifier::standard()
        .decode("salt/job/20240101120000000001/ret", json!({"retcode": "zero"}))
        .unwrap_err();

    assert_eq!(err.kind, EventKind::JobReturn);
    assert!(err.to_string().starts_with("failed to decode job_return payload"));
}

#[test]
fn bad_timestamp_is_a_decode_failure() {
    let err = Classifier::standard()
        .decode("salt/auth", json!({"_stamp": "last tuesday"}))
        .unwrap_err();
    assert_eq!(err.kind, EventKind::MinionAuth);
}

#[test]
fn failed_decode_leaves_event_untouched() {
    let mut event = Event::from(MinionStart {
        minion: "db01".into(),
        time: Timestamp::default(),
    });
    assert!(event.decode_value(json!({"id": 42})).is_err());
    assert!(matches!(&event, Event::MinionStart(start) if start.minion == "db01"));
}

#[test]
fn decoding_is_idempotent() {
    let payload = json!({
        "_stamp": "2024-01-01T12:00:00.123456",
        "fun": "test.ping",
        "jid": "20240101120000000003",
        "minions": ["a", "b"],
        "tgt": "*",
        "tgt_type": "glob",
        "user": "salt"
    });
    let classifier = Classifier::standard();
    let tag = "salt/job/20240101120000000003/new";

    let first = classifier.decode(tag, payload.clone()).unwrap();
    let second = classifier.decode(tag, payload).unwrap();
    assert_eq!(first, second);
}

#[test]
fn slice_and_value_decoding_agree() {
    let raw = br#"{"_stamp": "2024-01-01T12:00:00.000000", "lost": ["x"], "new": []}"#;
    let classifier = Classifier::standard();

    let from_slice = classifier
        .classify("salt/presence/change")
        .into_match()
        .unwrap()
        .decode_slice(raw)
        .unwrap();
    let from_value = classifier
        .decode(
            "salt/presence/change",
            serde_json::from_slice(raw).unwrap(),
        )
        .unwrap()
        .unwrap();

    assert_eq!(from_slice, from_value);
}

#[test]
fn envelope_decodes_like_a_tag_payload_pair() {
    let envelope: EventEnvelope = serde_json::from_value(json!({
        "tag": "salt/minion/web01/start",
        "data": {"id": "web01", "_stamp": "2024-01-01T12:00:00.000000"}
    }))
    .unwrap();

    let event = Classifier::standard()
        .decode_envelope(envelope)
        .unwrap()
        .unwrap();
    assert_eq!(event.kind(), EventKind::MinionStart);
}

#[test]
fn event_serializes_back_to_wire_names() {
    let payload = json!({
        "_stamp": "2024-01-01T12:00:00.123456",
        "act": "delete",
        "id": "old01",
        "result": true
    });
    let event = decode("salt/key", payload.clone());
    assert_eq!(serde_json::to_value(&event).unwrap(), payload);

    let epoch = decode("salt/presence/present", json!({"_stamp": 1704110400.25, "present": []}));
    let Event::PresencePresent(present) = &epoch else {
        panic!("expected presence_present");
    };
    assert_eq!(present.time.format(), StampFormat::EpochSeconds);
    assert_eq!(
        serde_json::to_value(&epoch).unwrap(),
        json!({"_stamp": 1704110400.25, "present": []})
    );
}
