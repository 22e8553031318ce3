mod mocks;

mod claim_tests;
