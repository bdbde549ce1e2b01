mod enrichment_test;
mod extraction_test;
