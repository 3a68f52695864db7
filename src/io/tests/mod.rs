mod peek_reader_tests;
