use crate::dram::{
    ReadRequest, RequestBuffer, SbrTable, SrrTable, MAX_REQUESTS, MAX_SBR_ENTRIES, MAX_SRR_ENTRIES,
};
use crate::sched::batch::{BatchScheduler, BatchSummary};
use crate::sched::error::SchedError;

fn build_batch(reqs: &[(u8, u8, u32, u16)]) -> (RequestBuffer, SrrTable, SbrTable, BatchSummary) {
    let mut requests = RequestBuffer::new(MAX_REQUESTS);
    let mut srr = SrrTable::new(MAX_SRR_ENTRIES);
    let mut sbr = SbrTable::new(MAX_SBR_ENTRIES);
    for &(group, bank, row, col) in reqs {
        assert!(requests.try_push(ReadRequest::new(group, bank, row, col)));
    }
    let summary = BatchScheduler::new(&mut requests, &mut srr, &mut sbr)
        .run()
        .expect("batch should build");
    (requests, srr, sbr, summary)
}

/// Walks every chain and checks the structural invariants: each request sits
/// in exactly one row chain of matching length, each row cluster in exactly
/// one bank chain, and the bank totals add up.
fn assert_chains_consistent(requests: &RequestBuffer, srr: &SrrTable, sbr: &SbrTable) {
    let mut seen_reqs = vec![false; requests.len()];
    let mut seen_srrs = vec![false; srr.len()];

    for bank_addr in 0..sbr.len() {
        let bank = sbr.entry(bank_addr);
        let mut rows = 0;
        let mut total = 0;
        let mut srr_ptr = Some(bank.head_srr);
        while let Some(addr) = srr_ptr {
            assert!(!seen_srrs[addr], "row cluster {addr} chained twice");
            seen_srrs[addr] = true;
            let entry = srr.entry(addr);
            assert_eq!(
                (entry.tag.group, entry.tag.bank),
                (bank.tag.group, bank.tag.bank),
                "row cluster {addr} chained into the wrong bank"
            );
            rows += 1;
            total += entry.count;

            let mut len = 0;
            let mut req_ptr = Some(entry.head_req);
            while let Some(id) = req_ptr {
                assert!(!seen_reqs[id], "request {id} chained twice");
                seen_reqs[id] = true;
                assert_eq!(requests.get(id).hit_tag(), entry.tag);
                len += 1;
                if req_ptr == Some(entry.tail_req) {
                    break;
                }
                req_ptr = requests.chain_next(id);
            }
            assert_eq!(len, entry.count, "row cluster {addr} count mismatch");

            if srr_ptr == Some(bank.tail_srr) {
                break;
            }
            srr_ptr = entry.next_srr;
        }
        assert_eq!(rows, bank.row_count, "bank cluster {bank_addr} row count");
        assert_eq!(
            total, bank.total_requests,
            "bank cluster {bank_addr} request total"
        );
    }

    assert!(seen_reqs.iter().all(|&seen| seen), "unchained request");
    assert!(seen_srrs.iter().all(|&seen| seen), "unchained row cluster");
}

#[test]
fn hits_extend_a_single_row_cluster() {
    let reqs = [(0, 0, 512, 0), (0, 0, 512, 8), (0, 0, 512, 16)];
    let (requests, srr, sbr, summary) = build_batch(&reqs);
    assert_eq!(summary.num_srr, 1);
    assert_eq!(summary.num_sbr, 1);
    assert_eq!(srr.entry(0).count, 3);
    assert_eq!(srr.entry(0).head_req, 0);
    assert_eq!(srr.entry(0).tail_req, 2);
    assert_eq!(requests.chain_next(0), Some(1));
    assert_eq!(requests.chain_next(1), Some(2));
    assert_eq!(requests.chain_next(2), None);
    assert_chains_consistent(&requests, &srr, &sbr);
}

#[test]
fn row_clusters_allocate_in_first_seen_order() {
    let reqs = [(0, 0, 10, 0), (0, 1, 20, 0), (0, 0, 10, 8), (0, 0, 30, 0)];
    let (requests, srr, sbr, _) = build_batch(&reqs);
    assert_eq!(srr.entry(0).tag.row, 10);
    assert_eq!(srr.entry(1).tag.row, 20);
    assert_eq!(srr.entry(2).tag.row, 30);
    assert_chains_consistent(&requests, &srr, &sbr);
}

#[test]
fn bank_chains_link_rows_of_one_bank() {
    let reqs = [(0, 0, 10, 0), (0, 0, 11, 0), (0, 0, 12, 0)];
    let (requests, srr, sbr, summary) = build_batch(&reqs);
    assert_eq!(summary.num_sbr, 1);
    let bank = sbr.entry(0);
    assert_eq!(bank.row_count, 3);
    assert_eq!(bank.total_requests, 3);
    assert_eq!(bank.head_srr, 0);
    assert_eq!(bank.tail_srr, 2);
    assert_eq!(srr.entry(0).next_srr, Some(1));
    assert_eq!(srr.entry(1).next_srr, Some(2));
    assert_eq!(srr.entry(2).next_srr, None);
    assert_chains_consistent(&requests, &srr, &sbr);
}

#[test]
fn critical_path_is_the_busiest_bank() {
    let reqs = [
        (0, 0, 100, 0),
        (0, 1, 200, 0),
        (0, 0, 100, 8),
        (1, 0, 300, 0),
    ];
    let (requests, srr, sbr, summary) = build_batch(&reqs);
    assert_eq!(summary.num_srr, 3);
    assert_eq!(summary.num_sbr, 3);
    assert_eq!(summary.critical_path, Some(0));
    assert_chains_consistent(&requests, &srr, &sbr);
}

#[test]
fn critical_path_ties_break_to_lowest_index() {
    let reqs = [(0, 1, 10, 0), (1, 0, 20, 0), (0, 1, 11, 0), (1, 0, 21, 0)];
    let (_, _, _, summary) = build_batch(&reqs);
    assert_eq!(summary.critical_path, Some(0));
}

#[test]
fn empty_batch_builds_empty_tables() {
    let (_, srr, sbr, summary) = build_batch(&[]);
    assert_eq!(summary.num_requests, 0);
    assert!(srr.is_empty());
    assert!(sbr.is_empty());
    assert_eq!(summary.critical_path, None);
}

#[test]
fn kitchen_sink_population() {
    let reqs = [
        (0, 0, 100, 0),
        (1, 0, 200, 0),
        (0, 1, 300, 0),
        (0, 0, 100, 8),
        (0, 1, 301, 0),
        (1, 0, 200, 8),
        (0, 0, 100, 16),
    ];
    let (requests, srr, sbr, summary) = build_batch(&reqs);
    assert_eq!(summary.num_requests, 7);
    assert_eq!(summary.num_srr, 4);
    assert_eq!(summary.num_sbr, 3);
    assert_eq!(summary.critical_path, Some(0));
    assert_eq!(sbr.entry(0).total_requests, 3);
    assert_chains_consistent(&requests, &srr, &sbr);
}

#[test]
fn srr_overflow_aborts_the_batch() {
    let mut requests = RequestBuffer::new(MAX_REQUESTS);
    let mut srr = SrrTable::new(2);
    let mut sbr = SbrTable::new(MAX_SBR_ENTRIES);
    for row in 0..3 {
        assert!(requests.try_push(ReadRequest::new(0, 0, row, 0)));
    }
    let err = BatchScheduler::new(&mut requests, &mut srr, &mut sbr)
        .run()
        .expect_err("third row should overflow");
    assert_eq!(err, SchedError::SrrTableFull { capacity: 2 });
}

#[test]
fn sbr_overflow_aborts_the_batch() {
    let mut requests = RequestBuffer::new(MAX_REQUESTS);
    let mut srr = SrrTable::new(MAX_SRR_ENTRIES);
    let mut sbr = SbrTable::new(1);
    assert!(requests.try_push(ReadRequest::new(0, 0, 1, 0)));
    assert!(requests.try_push(ReadRequest::new(0, 1, 2, 0)));
    let err = BatchScheduler::new(&mut requests, &mut srr, &mut sbr)
        .run()
        .expect_err("second bank should overflow");
    assert_eq!(err, SchedError::SbrTableFull { capacity: 1 });
}
