mod form_flow_tests;
